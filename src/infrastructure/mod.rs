//! Infrastructure layer
//!
//! Adapters behind the domain ports (in-memory persistence, password
//! hashers, clocks) plus configuration, telemetry and wiring.

pub mod clock;
pub mod config;
pub mod container;
pub mod persistence;
pub mod security;
pub mod telemetry;

pub use container::AppContainer;
