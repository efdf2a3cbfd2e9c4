use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ports::PasswordHasher;
use crate::domain::common::{DomainError, ValidationError};

lazy_static! {
  static ref EMAIL_SHAPE: Regex =
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  pub const MAX_LENGTH: usize = 254;

  /// Creates a new Email after validation.
  ///
  /// Rules are checked in order: empty, shape, length. The stored value is
  /// trimmed and lowercased.
  pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
    let trimmed = email.as_ref().trim();

    if trimmed.is_empty() {
      return Err(ValidationError::EmptyEmail);
    }

    if !EMAIL_SHAPE.is_match(trimmed) {
      return Err(ValidationError::InvalidEmailFormat);
    }

    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::EmailTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(trimmed.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Email {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Email> for String {
  fn from(email: Email) -> Self {
    email.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 8;
  pub const SPECIAL_CHARACTERS: &'static str = "@$!%*?&#";

  /// Creates a new Password after strength validation.
  ///
  /// The first failing rule is reported, in the order: empty, length,
  /// uppercase, lowercase, digit, special character.
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = Self(password.into());

    if password.0.is_empty() {
      return Err(ValidationError::PasswordEmpty);
    }

    if password.0.chars().count() < Self::MIN_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }

    if !password.0.chars().any(|c| c.is_ascii_uppercase()) {
      return Err(ValidationError::PasswordMissingUppercase);
    }

    if !password.0.chars().any(|c| c.is_ascii_lowercase()) {
      return Err(ValidationError::PasswordMissingLowercase);
    }

    if !password.0.chars().any(|c| c.is_ascii_digit()) {
      return Err(ValidationError::PasswordMissingDigit);
    }

    if !password
      .0
      .chars()
      .any(|c| Self::SPECIAL_CHARACTERS.contains(c))
    {
      return Err(ValidationError::PasswordMissingSpecial);
    }

    Ok(password)
  }

  /// Hashes the password with the given strategy
  pub async fn hash(&self, hasher: &dyn PasswordHasher) -> Result<PasswordHash, DomainError> {
    hasher.hash(self).await
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object
// ============================================================================

/// Opaque digest produced by a `PasswordHasher`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing digest string
  pub fn from_hash(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
