use serde::Deserialize;
use std::sync::Arc;

use crate::domain::client::ClientService;
use crate::domain::common::{ClientId, DomainError};

#[derive(Debug, Deserialize)]
pub struct DeleteClientCommand {
  pub client_id: ClientId,
}

pub struct DeleteClientUseCase {
  client_service: Arc<ClientService>,
}

impl DeleteClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  /// Deletes a client
  ///
  /// # Errors
  /// `NotFound(Client)`, or `ConflictReason::ClientHasInvoices` while any
  /// invoice still references it.
  pub async fn execute(&self, command: DeleteClientCommand) -> Result<(), DomainError> {
    self.client_service.delete(command.client_id).await
  }
}
