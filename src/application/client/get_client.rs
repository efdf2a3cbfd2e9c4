use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::client::{Client, ClientService};
use crate::domain::common::{ClientId, DomainError, UserId};

#[derive(Debug, Deserialize)]
pub struct GetClientCommand {
  pub client_id: ClientId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDto {
  pub id: ClientId,
  pub user_id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub siret: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientDto {
  fn from(client: Client) -> Self {
    Self {
      id: client.id,
      user_id: client.user_id,
      full_name: client.full_name(),
      first_name: client.first_name,
      last_name: client.last_name,
      email: client.email.into_inner(),
      phone: client.phone,
      address: client.address,
      siret: client.siret,
      created_at: client.created_at,
      updated_at: client.updated_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct GetClientResponse {
  pub client: ClientDto,
}

pub struct GetClientUseCase {
  client_service: Arc<ClientService>,
}

impl GetClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, command: GetClientCommand) -> Result<GetClientResponse, DomainError> {
    let client = self.client_service.get(command.client_id).await?;
    Ok(GetClientResponse {
      client: client.into(),
    })
  }
}
