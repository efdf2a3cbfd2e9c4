pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Client, ClientChanges, NewClient};
pub use ports::ClientRepository;
pub use services::ClientService;
