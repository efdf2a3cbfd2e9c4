mod argon2_hasher;
mod placeholder_hasher;

pub use argon2_hasher::Argon2PasswordHasher;
pub use placeholder_hasher::PlaceholderPasswordHasher;
