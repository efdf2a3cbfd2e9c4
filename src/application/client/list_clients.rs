use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::get_client::ClientDto;
use crate::domain::client::ClientService;
use crate::domain::common::{DomainError, Page, PageRequest, UserId};

#[derive(Debug, Default, Deserialize)]
pub struct ListClientsCommand {
  pub user_id: UserId,
  /// Name filter, blank or absent lists everything
  #[serde(default)]
  pub query: Option<String>,
  /// 1-based page, defaults to the first
  #[serde(default)]
  pub page: Option<usize>,
  #[serde(default)]
  pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
  pub clients: Page<ClientDto>,
}

pub struct ListClientsUseCase {
  client_service: Arc<ClientService>,
  page_size: usize,
}

impl ListClientsUseCase {
  pub fn new(client_service: Arc<ClientService>, page_size: usize) -> Self {
    Self {
      client_service,
      page_size,
    }
  }

  pub async fn execute(
    &self,
    command: ListClientsCommand,
  ) -> Result<ListClientsResponse, DomainError> {
    let clients = match command.query.as_deref() {
      Some(query) => self.client_service.search(command.user_id, query).await?,
      None => self.client_service.list(command.user_id).await?,
    };

    let request = PageRequest::new(
      command.page.unwrap_or(1),
      command.per_page.unwrap_or(self.page_size),
    );
    Ok(ListClientsResponse {
      clients: Page::paginate(clients, request).map(ClientDto::from),
    })
  }
}
