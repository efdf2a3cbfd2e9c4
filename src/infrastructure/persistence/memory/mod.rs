mod client_repository;
mod database;
mod invoice_repository;
pub mod seed;
mod user_repository;

pub use client_repository::InMemoryClientRepository;
pub use database::InMemoryDatabase;
pub use invoice_repository::InMemoryInvoiceRepository;
pub use user_repository::InMemoryUserRepository;
