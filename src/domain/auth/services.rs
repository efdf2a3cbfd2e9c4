use std::sync::Arc;
use tracing::{debug, info, warn};

use super::entities::{ProfileChanges, User, UserProfile};
use super::ports::{PasswordHasher, UserRepository};
use super::value_objects::{Email, Password};
use crate::domain::common::{
  AuthFailure, Clock, ConflictReason, DomainError, EntityKind, RepositoryError, UserId,
  ValidationError,
};

/// Registration input once the raw strings have been turned into value objects
pub struct Registration {
  pub email: Email,
  pub password: Password,
  pub profile: UserProfile,
}

/// Authentication service implementing account business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  clock: Arc<dyn Clock>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      clock,
    }
  }

  /// Registers a new user
  ///
  /// # Errors
  /// Returns `ConflictReason::EmailTaken` if the normalized email is already
  /// registered, or a validation error for blank profile names.
  pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
    let Registration {
      email,
      password,
      profile,
    } = registration;

    if profile.first_name.trim().is_empty() {
      return Err(ValidationError::MissingField { field: "first_name" }.into());
    }
    if profile.last_name.trim().is_empty() {
      return Err(ValidationError::MissingField { field: "last_name" }.into());
    }

    if self.user_repo.exists_by_email(&email).await? {
      warn!(email = %email, "Registration rejected, email already in use");
      return Err(ConflictReason::EmailTaken.into());
    }

    let password_hash = password.hash(self.password_hasher.as_ref()).await?;
    let user = User::new(email, password_hash, profile, self.clock.now());

    let created = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(DomainError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(ConflictReason::EmailTaken.into());
      }
      Err(e) => return Err(e),
    };

    info!(user_id = %created.id, "User registered");
    Ok(created)
  }

  /// Authenticates a user by email and password
  ///
  /// # Errors
  /// An unknown email and a wrong password both yield
  /// `AuthFailure::InvalidCredentials`, so callers cannot probe which
  /// accounts exist. A malformed email is a validation error.
  pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
    let email = Email::new(email)?;

    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      debug!("Login failed: unknown email");
      return Err(AuthFailure::InvalidCredentials.into());
    };

    if !self
      .password_hasher
      .verify(password, &user.password_hash)
      .await?
    {
      debug!(user_id = %user.id, "Login failed: password mismatch");
      return Err(AuthFailure::InvalidCredentials.into());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(user)
  }

  pub async fn get_user(&self, user_id: UserId) -> Result<User, DomainError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(DomainError::NotFound(EntityKind::User))
  }

  /// Applies a profile edit to an existing user
  pub async fn update_profile(
    &self,
    user_id: UserId,
    changes: ProfileChanges,
  ) -> Result<User, DomainError> {
    let mut user = self.get_user(user_id).await?;
    user.update_profile(changes, self.clock.now())?;

    let updated = self.user_repo.update(user).await?;
    info!(user_id = %updated.id, "User profile updated");
    Ok(updated)
  }
}
