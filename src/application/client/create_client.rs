use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::get_client::ClientDto;
use crate::domain::client::{ClientService, NewClient};
use crate::domain::common::{DomainError, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateClientCommand {
  pub user_id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  #[serde(default)]
  pub siret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateClientResponse {
  pub client: ClientDto,
}

pub struct CreateClientUseCase {
  client_service: Arc<ClientService>,
}

impl CreateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  /// Creates a client for the user
  ///
  /// # Errors
  /// `MissingField` for a blank first name, last name, phone or address
  /// (checked in that order), then email validation errors.
  pub async fn execute(
    &self,
    command: CreateClientCommand,
  ) -> Result<CreateClientResponse, DomainError> {
    let client = self
      .client_service
      .create(
        command.user_id,
        NewClient {
          first_name: command.first_name,
          last_name: command.last_name,
          email: command.email,
          phone: command.phone,
          address: command.address,
          siret: command.siret,
        },
      )
      .await?;

    Ok(CreateClientResponse {
      client: client.into(),
    })
  }
}
