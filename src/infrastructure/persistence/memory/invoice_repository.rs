use async_trait::async_trait;
use std::sync::Arc;

use super::database::InMemoryDatabase;
use crate::domain::common::{
  ClientId, DomainError, EntityKind, InvoiceId, RepositoryError, UserId,
};
use crate::domain::invoice::{Invoice, InvoiceRepository};

/// In-memory implementation of the InvoiceRepository trait
pub struct InMemoryInvoiceRepository {
  db: Arc<InMemoryDatabase>,
}

impl InMemoryInvoiceRepository {
  /// Creates a new instance of InMemoryInvoiceRepository
  pub fn new(db: Arc<InMemoryDatabase>) -> Self {
    Self { db }
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, DomainError> {
    let mut tables = self.db.write().await;

    if tables.invoices.contains_key(&invoice.id) {
      return Err(RepositoryError::DuplicateKey("invoices.id".to_string()).into());
    }
    // Numbers are unique per user
    if tables
      .invoices
      .values()
      .any(|i| i.user_id == invoice.user_id && i.number == invoice.number)
    {
      return Err(RepositoryError::DuplicateKey("invoices.number".to_string()).into());
    }
    // The client may have been deleted since the service resolved it
    if !tables.clients.contains_key(&invoice.client_id) {
      return Err(DomainError::NotFound(EntityKind::Client));
    }

    tables.invoices.insert(invoice.id, invoice.clone());
    Ok(invoice)
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, DomainError> {
    let mut tables = self.db.write().await;
    if !tables.clients.contains_key(&invoice.client_id) {
      return Err(DomainError::NotFound(EntityKind::Client));
    }
    let Some(stored) = tables.invoices.get_mut(&invoice.id) else {
      return Err(RepositoryError::NotFound.into());
    };
    *stored = invoice.clone();
    Ok(invoice)
  }

  async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, DomainError> {
    Ok(self.db.read().await.invoices.get(&id).cloned())
  }

  async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Invoice>, DomainError> {
    Ok(
      self
        .db
        .read()
        .await
        .invoices
        .values()
        .filter(|i| i.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Invoice>, DomainError> {
    Ok(
      self
        .db
        .read()
        .await
        .invoices
        .values()
        .filter(|i| i.client_id == client_id)
        .cloned()
        .collect(),
    )
  }

  async fn delete(&self, id: InvoiceId) -> Result<(), DomainError> {
    self
      .db
      .write()
      .await
      .invoices
      .remove(&id)
      .map(|_| ())
      .ok_or_else(|| RepositoryError::NotFound.into())
  }
}
