use async_trait::async_trait;

use super::entities::Invoice;
use crate::domain::common::{ClientId, DomainError, InvoiceId, UserId};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// `create` and `update` fail with `NotFound(Client)` when the referenced
  /// client is not stored at write time
  async fn create(&self, invoice: Invoice) -> Result<Invoice, DomainError>;
  async fn update(&self, invoice: Invoice) -> Result<Invoice, DomainError>;
  async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, DomainError>;
  async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Invoice>, DomainError>;
  async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Invoice>, DomainError>;
  async fn delete(&self, id: InvoiceId) -> Result<(), DomainError>;
}
