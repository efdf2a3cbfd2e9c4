use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::auth::Email;
use crate::domain::auth::entities::required_change;
use crate::domain::common::{ClientId, UserId, ValidationError};

/// Client creation data, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub siret: Option<String>,
}

/// Partial client edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub address: Option<String>,
  /// `Some("")` clears the SIRET
  pub siret: Option<String>,
}

/// A customer of the user, invoiced by them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub id: ClientId,
  pub user_id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub email: Email,
  pub phone: String,
  pub address: String,
  pub siret: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Client {
  /// Validates and builds a client. Required fields are checked before the
  /// email so the first missing field is reported first.
  pub fn new(user_id: UserId, data: NewClient, now: DateTime<Utc>) -> Result<Self, ValidationError> {
    let first_name = required(data.first_name, "first_name")?;
    let last_name = required(data.last_name, "last_name")?;
    let phone = required(data.phone, "phone")?;
    let address = required(data.address, "address")?;
    let email = Email::new(data.email)?;

    Ok(Self {
      id: ClientId::new(),
      user_id,
      first_name,
      last_name,
      email,
      phone,
      address,
      siret: normalize_optional(data.siret),
      created_at: now,
      updated_at: now,
    })
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Merges an edit. Nothing is changed unless every provided field is valid.
  pub fn apply(&mut self, changes: ClientChanges, now: DateTime<Utc>) -> Result<(), ValidationError> {
    let first_name = required_change(changes.first_name, "first_name")?;
    let last_name = required_change(changes.last_name, "last_name")?;
    let phone = required_change(changes.phone, "phone")?;
    let address = required_change(changes.address, "address")?;
    let email = changes.email.map(Email::new).transpose()?;

    if let Some(first_name) = first_name {
      self.first_name = first_name;
    }
    if let Some(last_name) = last_name {
      self.last_name = last_name;
    }
    if let Some(phone) = phone {
      self.phone = phone;
    }
    if let Some(address) = address {
      self.address = address;
    }
    if let Some(email) = email {
      self.email = email;
    }
    if changes.siret.is_some() {
      self.siret = normalize_optional(changes.siret);
    }

    self.updated_at = now;
    Ok(())
  }

  /// Case-insensitive match on first name, last name or "first last".
  /// `needle` must already be lowercased.
  pub fn matches(&self, needle: &str) -> bool {
    self.first_name.to_lowercase().contains(needle)
      || self.last_name.to_lowercase().contains(needle)
      || self.full_name().to_lowercase().contains(needle)
  }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::MissingField { field });
  }
  Ok(trimmed.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}
