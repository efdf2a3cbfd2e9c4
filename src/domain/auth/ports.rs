use async_trait::async_trait;

use super::entities::User;
use super::value_objects::{Email, Password, PasswordHash};
use crate::domain::common::{DomainError, UserId};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, DomainError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

  /// Finds a user by their normalized email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

  /// Updates an existing user
  async fn update(&self, user: User) -> Result<User, DomainError>;

  /// Checks whether an account already uses this email
  async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
    Ok(self.find_by_email(email).await?.is_some())
  }
}

/// Service trait for password hashing operations.
///
/// Both operations must be deterministic for a given input and free of side
/// effects, so any strategy can be swapped in without touching the domain.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a validated plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, DomainError>;

  /// Verifies a plain text password against a stored digest
  async fn verify(&self, plain: &str, hashed_password: &PasswordHash) -> Result<bool, DomainError>;
}
