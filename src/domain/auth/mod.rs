pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{BankDetails, ProfileChanges, User, UserProfile};
pub use ports::{PasswordHasher, UserRepository};
pub use services::{AuthService, Registration};
pub use value_objects::{Email, Password, PasswordHash};
