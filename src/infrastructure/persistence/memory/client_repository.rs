use async_trait::async_trait;
use std::sync::Arc;

use super::database::InMemoryDatabase;
use crate::domain::client::{Client, ClientRepository};
use crate::domain::common::{ClientId, ConflictReason, DomainError, RepositoryError, UserId};

/// In-memory implementation of the ClientRepository trait
pub struct InMemoryClientRepository {
  db: Arc<InMemoryDatabase>,
}

impl InMemoryClientRepository {
  /// Creates a new instance of InMemoryClientRepository
  pub fn new(db: Arc<InMemoryDatabase>) -> Self {
    Self { db }
  }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
  async fn create(&self, client: Client) -> Result<Client, DomainError> {
    let mut tables = self.db.write().await;
    if tables.clients.contains_key(&client.id) {
      return Err(RepositoryError::DuplicateKey("clients.id".to_string()).into());
    }
    tables.clients.insert(client.id, client.clone());
    Ok(client)
  }

  async fn update(&self, client: Client) -> Result<Client, DomainError> {
    let mut tables = self.db.write().await;
    let Some(stored) = tables.clients.get_mut(&client.id) else {
      return Err(RepositoryError::NotFound.into());
    };
    *stored = client.clone();
    Ok(client)
  }

  async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError> {
    Ok(self.db.read().await.clients.get(&id).cloned())
  }

  async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Client>, DomainError> {
    Ok(
      self
        .db
        .read()
        .await
        .clients
        .values()
        .filter(|c| c.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  /// Refuses to orphan invoices, checked under the same write lock as the
  /// removal
  async fn delete(&self, id: ClientId) -> Result<(), DomainError> {
    let mut tables = self.db.write().await;
    if tables.invoices.values().any(|i| i.client_id == id) {
      return Err(ConflictReason::ClientHasInvoices.into());
    }
    tables
      .clients
      .remove(&id)
      .map(|_| ())
      .ok_or_else(|| RepositoryError::NotFound.into())
  }

  async fn has_invoices(&self, client_id: ClientId) -> Result<bool, DomainError> {
    Ok(
      self
        .db
        .read()
        .await
        .invoices
        .values()
        .any(|i| i.client_id == client_id),
    )
  }
}
