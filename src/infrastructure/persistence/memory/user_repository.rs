use async_trait::async_trait;
use std::sync::Arc;

use super::database::InMemoryDatabase;
use crate::domain::auth::{Email, User, UserRepository};
use crate::domain::common::{DomainError, RepositoryError, UserId};

/// In-memory implementation of the UserRepository trait
pub struct InMemoryUserRepository {
  db: Arc<InMemoryDatabase>,
}

impl InMemoryUserRepository {
  /// Creates a new instance of InMemoryUserRepository
  pub fn new(db: Arc<InMemoryDatabase>) -> Self {
    Self { db }
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, DomainError> {
    let mut tables = self.db.write().await;

    if tables.users.values().any(|u| u.email == user.email) {
      return Err(RepositoryError::DuplicateKey("users.email".to_string()).into());
    }
    if tables.users.contains_key(&user.id) {
      return Err(RepositoryError::DuplicateKey("users.id".to_string()).into());
    }

    tables.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
    Ok(self.db.read().await.users.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
    Ok(
      self
        .db
        .read()
        .await
        .users
        .values()
        .find(|u| &u.email == email)
        .cloned(),
    )
  }

  async fn update(&self, user: User) -> Result<User, DomainError> {
    let mut tables = self.db.write().await;
    let Some(stored) = tables.users.get_mut(&user.id) else {
      return Err(RepositoryError::NotFound.into());
    };
    *stored = user.clone();
    Ok(user)
  }
}
