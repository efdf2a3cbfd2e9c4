use std::sync::Arc;
use tracing::info;

use super::clock::SystemClock;
use super::config::{Config, PasswordHasherKind};
use super::persistence::memory::{
  InMemoryClientRepository, InMemoryDatabase, InMemoryInvoiceRepository, InMemoryUserRepository,
};
use super::security::{Argon2PasswordHasher, PlaceholderPasswordHasher};
use crate::application::auth::{LoginUserUseCase, RegisterUserUseCase, UpdateProfileUseCase};
use crate::application::client::{
  CreateClientUseCase, DeleteClientUseCase, GetClientUseCase, ListClientsUseCase,
  UpdateClientUseCase,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase,
  GetInvoiceDetailsUseCase, ListInvoicesUseCase, UpdateInvoiceUseCase,
};
use crate::domain::auth::{AuthService, PasswordHasher};
use crate::domain::client::ClientService;
use crate::domain::common::{Clock, DomainError};
use crate::domain::invoice::InvoiceService;

/// Every use case wired against one shared in-memory database
pub struct AppContainer {
  pub database: Arc<InMemoryDatabase>,

  pub login_user: LoginUserUseCase,
  pub register_user: RegisterUserUseCase,
  pub update_profile: UpdateProfileUseCase,

  pub create_client: CreateClientUseCase,
  pub update_client: UpdateClientUseCase,
  pub delete_client: DeleteClientUseCase,
  pub get_client: GetClientUseCase,
  pub list_clients: ListClientsUseCase,

  pub create_invoice: CreateInvoiceUseCase,
  pub update_invoice: UpdateInvoiceUseCase,
  pub delete_invoice: DeleteInvoiceUseCase,
  pub get_invoice_details: GetInvoiceDetailsUseCase,
  pub change_invoice_status: ChangeInvoiceStatusUseCase,
  pub list_invoices: ListInvoicesUseCase,
}

impl AppContainer {
  /// Wires the container on the wall clock
  pub fn build(config: &Config) -> Result<Self, DomainError> {
    Self::with_clock(config, Arc::new(SystemClock))
  }

  /// Wires the container with an explicit clock
  pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
    let database = Arc::new(if config.data.seed_demo_data {
      InMemoryDatabase::seeded()
    } else {
      InMemoryDatabase::new()
    });

    let password_hasher: Arc<dyn PasswordHasher> = match config.security.password_hasher {
      PasswordHasherKind::Placeholder => Arc::new(PlaceholderPasswordHasher),
      PasswordHasherKind::Argon2 => Arc::new(Argon2PasswordHasher::new()?),
    };

    let user_repo = Arc::new(InMemoryUserRepository::new(database.clone()));
    let client_repo = Arc::new(InMemoryClientRepository::new(database.clone()));
    let invoice_repo = Arc::new(InMemoryInvoiceRepository::new(database.clone()));

    let auth_service = Arc::new(AuthService::new(user_repo, password_hasher, clock.clone()));
    let client_service = Arc::new(ClientService::new(client_repo.clone(), clock.clone()));
    let invoice_service = Arc::new(InvoiceService::new(invoice_repo, client_repo, clock));

    let page_size = config.pagination.page_size;

    info!(
      hasher = ?config.security.password_hasher,
      seeded = config.data.seed_demo_data,
      page_size,
      "Application container ready"
    );

    Ok(Self {
      database,
      login_user: LoginUserUseCase::new(auth_service.clone()),
      register_user: RegisterUserUseCase::new(auth_service.clone()),
      update_profile: UpdateProfileUseCase::new(auth_service),
      create_client: CreateClientUseCase::new(client_service.clone()),
      update_client: UpdateClientUseCase::new(client_service.clone()),
      delete_client: DeleteClientUseCase::new(client_service.clone()),
      get_client: GetClientUseCase::new(client_service.clone()),
      list_clients: ListClientsUseCase::new(client_service.clone(), page_size),
      create_invoice: CreateInvoiceUseCase::new(invoice_service.clone()),
      update_invoice: UpdateInvoiceUseCase::new(invoice_service.clone()),
      delete_invoice: DeleteInvoiceUseCase::new(invoice_service.clone()),
      get_invoice_details: GetInvoiceDetailsUseCase::new(
        invoice_service.clone(),
        client_service.clone(),
      ),
      change_invoice_status: ChangeInvoiceStatusUseCase::new(invoice_service.clone()),
      list_invoices: ListInvoicesUseCase::new(invoice_service, client_service, page_size),
    })
  }
}
