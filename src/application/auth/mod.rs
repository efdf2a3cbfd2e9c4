//! Authentication and account use cases

mod login_user;
mod register_user;
mod update_profile;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase, UserDto};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileResponse, UpdateProfileUseCase};
