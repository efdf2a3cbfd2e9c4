use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Email, PasswordHash};
use crate::domain::common::{UserId, ValidationError};

/// Banking details printed on the user's invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
  pub bank_name: Option<String>,
  pub iban: Option<String>,
  pub swift: Option<String>,
}

impl BankDetails {
  pub fn is_empty(&self) -> bool {
    [&self.bank_name, &self.iban, &self.swift]
      .iter()
      .all(|field| field.as_deref().is_none_or(|v| v.trim().is_empty()))
  }
}

/// Profile fields captured at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
  pub first_name: String,
  pub last_name: String,
  pub phone: String,
  pub company_name: String,
  pub address: String,
  pub bank: Option<BankDetails>,
}

/// Partial profile edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub phone: Option<String>,
  pub company_name: Option<String>,
  pub address: Option<String>,
  pub bank: Option<BankDetails>,
}

/// User entity representing an account holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: UserId,
  /// User's email address (unique, normalized)
  pub email: Email,
  /// Hashed password, never the plain text
  pub password_hash: PasswordHash,
  pub first_name: String,
  pub last_name: String,
  pub phone: String,
  pub company_name: String,
  pub address: String,
  pub bank: Option<BankDetails>,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(
    email: Email,
    password_hash: PasswordHash,
    profile: UserProfile,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: UserId::new(),
      email,
      password_hash,
      first_name: profile.first_name.trim().to_string(),
      last_name: profile.last_name.trim().to_string(),
      phone: profile.phone.trim().to_string(),
      company_name: profile.company_name.trim().to_string(),
      address: profile.address.trim().to_string(),
      bank: profile.bank.filter(|bank| !bank.is_empty()),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Applies a profile edit. Provided name fields must not be blank.
  pub fn update_profile(
    &mut self,
    changes: ProfileChanges,
    now: DateTime<Utc>,
  ) -> Result<(), ValidationError> {
    let first_name = required_change(changes.first_name, "first_name")?;
    let last_name = required_change(changes.last_name, "last_name")?;

    if let Some(first_name) = first_name {
      self.first_name = first_name;
    }
    if let Some(last_name) = last_name {
      self.last_name = last_name;
    }
    if let Some(phone) = changes.phone {
      self.phone = phone.trim().to_string();
    }
    if let Some(company_name) = changes.company_name {
      self.company_name = company_name.trim().to_string();
    }
    if let Some(address) = changes.address {
      self.address = address.trim().to_string();
    }
    if let Some(bank) = changes.bank {
      self.bank = Some(bank).filter(|bank| !bank.is_empty());
    }

    self.updated_at = now;
    Ok(())
  }
}

/// Trims an optional edit, rejecting a provided-but-blank value
pub(crate) fn required_change(
  value: Option<String>,
  field: &'static str,
) -> Result<Option<String>, ValidationError> {
  match value {
    Some(v) if v.trim().is_empty() => Err(ValidationError::MissingField { field }),
    Some(v) => Ok(Some(v.trim().to_string())),
    None => Ok(None),
  }
}
