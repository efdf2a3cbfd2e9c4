use std::sync::Arc;
use tracing::{debug, info, warn};

use super::entities::{Client, ClientChanges, NewClient};
use super::ports::ClientRepository;
use crate::domain::common::{ClientId, Clock, ConflictReason, DomainError, EntityKind, UserId};

/// Client service enforcing client business rules
pub struct ClientService {
  client_repo: Arc<dyn ClientRepository>,
  clock: Arc<dyn Clock>,
}

impl ClientService {
  /// Creates a new instance of ClientService
  pub fn new(client_repo: Arc<dyn ClientRepository>, clock: Arc<dyn Clock>) -> Self {
    Self { client_repo, clock }
  }

  /// Lists the user's clients, oldest first
  pub async fn list(&self, user_id: UserId) -> Result<Vec<Client>, DomainError> {
    let mut clients = self.client_repo.find_by_user_id(user_id).await?;
    clients.sort_by(|a, b| {
      a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
    debug!(user_id = %user_id, count = clients.len(), "Listed clients");
    Ok(clients)
  }

  /// Filters the user's clients by name. A blank query returns them all.
  pub async fn search(&self, user_id: UserId, query: &str) -> Result<Vec<Client>, DomainError> {
    let clients = self.list(user_id).await?;
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return Ok(clients);
    }

    Ok(
      clients
        .into_iter()
        .filter(|client| client.matches(&needle))
        .collect(),
    )
  }

  pub async fn get(&self, id: ClientId) -> Result<Client, DomainError> {
    self
      .client_repo
      .find_by_id(id)
      .await?
      .ok_or(DomainError::NotFound(EntityKind::Client))
  }

  pub async fn create(&self, user_id: UserId, data: NewClient) -> Result<Client, DomainError> {
    let client = Client::new(user_id, data, self.clock.now())?;
    let created = self.client_repo.create(client).await?;
    info!(client_id = %created.id, user_id = %user_id, "Client created");
    Ok(created)
  }

  pub async fn update(&self, id: ClientId, changes: ClientChanges) -> Result<Client, DomainError> {
    let mut client = self.get(id).await?;
    client.apply(changes, self.clock.now())?;

    let updated = self.client_repo.update(client).await?;
    info!(client_id = %updated.id, "Client updated");
    Ok(updated)
  }

  /// Deletes a client that no invoice references
  ///
  /// # Errors
  /// `ConflictReason::ClientHasInvoices` when at least one invoice points at it.
  pub async fn delete(&self, id: ClientId) -> Result<(), DomainError> {
    let client = self.get(id).await?;

    if self.client_repo.has_invoices(client.id).await? {
      warn!(client_id = %client.id, "Client deletion rejected, invoices exist");
      return Err(ConflictReason::ClientHasInvoices.into());
    }

    // repositories re-check the reference atomically with the removal
    self.client_repo.delete(client.id).await?;
    info!(client_id = %client.id, "Client deleted");
    Ok(())
  }
}
