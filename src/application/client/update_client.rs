use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::get_client::ClientDto;
use crate::domain::client::{ClientChanges, ClientService};
use crate::domain::common::{ClientId, DomainError};

/// Partial edit, absent fields are kept. An empty `siret` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientCommand {
  pub client_id: ClientId,
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub address: Option<String>,
  pub siret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateClientResponse {
  pub client: ClientDto,
}

pub struct UpdateClientUseCase {
  client_service: Arc<ClientService>,
}

impl UpdateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(
    &self,
    command: UpdateClientCommand,
  ) -> Result<UpdateClientResponse, DomainError> {
    let client = self
      .client_service
      .update(
        command.client_id,
        ClientChanges {
          first_name: command.first_name,
          last_name: command.last_name,
          email: command.email,
          phone: command.phone,
          address: command.address,
          siret: command.siret,
        },
      )
      .await?;

    Ok(UpdateClientResponse {
      client: client.into(),
    })
  }
}
