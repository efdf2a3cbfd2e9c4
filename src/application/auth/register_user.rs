use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::login_user::UserDto;
use crate::domain::auth::services::{AuthService, Registration};
use crate::domain::auth::value_objects::{Email, Password};
use crate::domain::auth::{BankDetails, UserProfile};
use crate::domain::common::DomainError;

/// Command for registering a new user
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserCommand {
  pub email: String,
  pub password: String,
  pub first_name: String,
  pub last_name: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub company_name: String,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub bank: Option<BankDetails>,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserResponse {
  pub user: UserDto,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Email then password validation errors, blank names, or
  /// `ConflictReason::EmailTaken`.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, DomainError> {
    let email = Email::new(&command.email)?;
    let password = Password::new(command.password)?;

    let user = self
      .auth_service
      .register(Registration {
        email,
        password,
        profile: UserProfile {
          first_name: command.first_name,
          last_name: command.last_name,
          phone: command.phone,
          company_name: command.company_name,
          address: command.address,
          bank: command.bank,
        },
      })
      .await?;

    Ok(RegisterUserResponse { user: user.into() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::common::{ConflictReason, ValidationError};
  use crate::infrastructure::clock::FixedClock;
  use crate::infrastructure::persistence::memory::{InMemoryDatabase, InMemoryUserRepository};
  use crate::infrastructure::security::PlaceholderPasswordHasher;

  fn use_case() -> RegisterUserUseCase {
    let db = Arc::new(InMemoryDatabase::seeded());
    RegisterUserUseCase::new(Arc::new(AuthService::new(
      Arc::new(InMemoryUserRepository::new(db)),
      Arc::new(PlaceholderPasswordHasher),
      Arc::new(FixedClock::ymd(2024, 3, 1)),
    )))
  }

  fn command(email: &str, password: &str) -> RegisterUserCommand {
    RegisterUserCommand {
      email: email.to_string(),
      password: password.to_string(),
      first_name: "Alice".to_string(),
      last_name: "Moreau".to_string(),
      phone: String::new(),
      company_name: String::new(),
      address: String::new(),
      bank: None,
    }
  }

  #[tokio::test]
  async fn test_register_returns_public_view() {
    let response = use_case()
      .execute(command("Alice@Moreau.fr", "Secret12!"))
      .await
      .unwrap();

    assert_eq!(response.user.email, "alice@moreau.fr");
    assert_eq!(response.user.full_name, "Alice Moreau");
    let json = serde_json::to_value(&response).unwrap();
    assert!(json["user"].get("password_hash").is_none());
  }

  #[tokio::test]
  async fn test_register_reports_weak_password() {
    let err = use_case()
      .execute(command("alice@moreau.fr", "secret12!"))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      DomainError::Validation(ValidationError::PasswordMissingUppercase)
    ));
  }

  #[tokio::test]
  async fn test_register_seeded_email_is_taken() {
    let err = use_case()
      .execute(command("TEST@factureo.com", "Secret12!"))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      DomainError::Conflict(ConflictReason::EmailTaken)
    ));
  }
}
