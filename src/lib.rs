//! Invoicing and client management core.
//!
//! Users keep a client book and issue invoices to those clients. The crate
//! is split the hexagonal way: `domain` holds entities, value objects, ports
//! and services; `application` exposes one use case per business action;
//! `infrastructure` provides the in-memory adapters and the wiring.

pub mod application;
pub mod domain;
pub mod infrastructure;
