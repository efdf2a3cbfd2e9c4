use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::login_user::UserDto;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::{BankDetails, ProfileChanges};
use crate::domain::common::{DomainError, UserId};

/// Command for editing the signed-in user's profile. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileCommand {
  pub user_id: UserId,
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub phone: Option<String>,
  pub company_name: Option<String>,
  pub address: Option<String>,
  pub bank: Option<BankDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileResponse {
  pub user: UserDto,
}

pub struct UpdateProfileUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateProfileUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: UpdateProfileCommand,
  ) -> Result<UpdateProfileResponse, DomainError> {
    let user = self
      .auth_service
      .update_profile(
        command.user_id,
        ProfileChanges {
          first_name: command.first_name,
          last_name: command.last_name,
          phone: command.phone,
          company_name: command.company_name,
          address: command.address,
          bank: command.bank,
        },
      )
      .await?;

    Ok(UpdateProfileResponse { user: user.into() })
  }
}
