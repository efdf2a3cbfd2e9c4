pub mod auth;
pub mod client;
pub mod common;
pub mod invoice;

pub use common::{DomainError, EntityKind};
