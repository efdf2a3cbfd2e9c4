use async_trait::async_trait;

use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};
use crate::domain::common::DomainError;

const PREFIX: &str = "hashed_";

/// Deterministic stand-in hasher producing `hashed_{plain}`.
///
/// Not a security measure. It exists so that demo and test data can carry
/// readable digests; use [`super::Argon2PasswordHasher`] for real accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderPasswordHasher;

#[async_trait]
impl PasswordHasher for PlaceholderPasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, DomainError> {
    Ok(PasswordHash::from_hash(format!("{PREFIX}{}", password.as_str())))
  }

  async fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError> {
    Ok(
      hash
        .as_str()
        .strip_prefix(PREFIX)
        .is_some_and(|stored| stored == plain),
    )
  }
}
