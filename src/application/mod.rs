//! Application layer
//!
//! Use cases that orchestrate domain services to implement one business
//! action each, with explicit command and response types.

pub mod auth;
pub mod client;
pub mod invoice;
