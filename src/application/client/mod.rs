//! Client management use cases

mod create_client;
mod delete_client;
mod get_client;
mod list_clients;
mod update_client;

pub use create_client::{CreateClientCommand, CreateClientResponse, CreateClientUseCase};
pub use delete_client::{DeleteClientCommand, DeleteClientUseCase};
pub use get_client::{ClientDto, GetClientCommand, GetClientResponse, GetClientUseCase};
pub use list_clients::{ListClientsCommand, ListClientsResponse, ListClientsUseCase};
pub use update_client::{UpdateClientCommand, UpdateClientResponse, UpdateClientUseCase};
