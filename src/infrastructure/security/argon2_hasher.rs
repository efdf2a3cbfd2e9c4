use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};
use crate::domain::common::DomainError;

/// Argon2id password hasher
///
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  /// Creates a new Argon2PasswordHasher
  pub fn new() -> Result<Self, DomainError> {
    let params = Params::new(19456, 2, 1, Some(32))
      .map_err(|e| DomainError::Hashing(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, DomainError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| DomainError::Hashing(format!("Failed to hash password: {}", e)))?;

    Ok(PasswordHash::from_hash(hash.to_string()))
  }

  /// Constant-time check against a PHC-formatted digest. A digest that is
  /// not Argon2 (for example a placeholder one) never verifies.
  async fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError> {
    let Ok(parsed) = Argon2PasswordHash::new(hash.as_str()) else {
      return Ok(false);
    };

    match self.argon2.verify_password(plain.as_bytes(), &parsed) {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(DomainError::Hashing(format!(
        "Password verification failed: {}",
        e
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_hash_and_verify() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("Secret12!").unwrap();

    let hash = hasher.hash(&password).await.unwrap();
    assert!(hash.as_str().starts_with("$argon2id$"));

    assert!(hasher.verify("Secret12!", &hash).await.unwrap());
    assert!(!hasher.verify("Secret12?", &hash).await.unwrap());
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("Secret12!").unwrap();

    let first = hasher.hash(&password).await.unwrap();
    let second = hasher.hash(&password).await.unwrap();

    assert_ne!(first.as_str(), second.as_str());
    assert!(hasher.verify("Secret12!", &second).await.unwrap());
  }

  #[tokio::test]
  async fn test_non_argon2_digest_never_verifies() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let placeholder = PasswordHash::from_hash("hashed_Test1234!");
    assert!(!hasher.verify("Test1234!", &placeholder).await.unwrap());
  }
}
