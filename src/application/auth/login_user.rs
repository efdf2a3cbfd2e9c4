use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::auth::{BankDetails, User};
use crate::domain::auth::services::AuthService;
use crate::domain::common::{DomainError, UserId};

/// Command for logging in a user
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Public view of an account, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
  pub id: UserId,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub full_name: String,
  pub phone: String,
  pub company_name: String,
  pub address: String,
  pub bank: Option<BankDetails>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      full_name: user.full_name(),
      email: user.email.into_inner(),
      first_name: user.first_name,
      last_name: user.last_name,
      phone: user.phone,
      company_name: user.company_name,
      address: user.address,
      bank: user.bank,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginUserResponse {
  pub user: UserDto,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// A malformed email is a validation error. An unknown email and a wrong
  /// password both return `AuthFailure::InvalidCredentials`.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, DomainError> {
    let user = self
      .auth_service
      .login(&command.email, &command.password)
      .await?;

    Ok(LoginUserResponse { user: user.into() })
  }
}
