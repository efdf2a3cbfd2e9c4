use async_trait::async_trait;

use super::entities::Client;
use crate::domain::common::{ClientId, DomainError, UserId};

#[async_trait]
pub trait ClientRepository: Send + Sync {
  async fn create(&self, client: Client) -> Result<Client, DomainError>;
  async fn update(&self, client: Client) -> Result<Client, DomainError>;
  async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError>;
  async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Client>, DomainError>;
  /// Fails with `ConflictReason::ClientHasInvoices` if an invoice still
  /// references the client at removal time
  async fn delete(&self, id: ClientId) -> Result<(), DomainError>;
  /// Whether any invoice references this client
  async fn has_invoices(&self, client_id: ClientId) -> Result<bool, DomainError>;
}
