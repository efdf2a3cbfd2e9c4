use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::get_invoice_details::cents;
use crate::domain::client::ClientService;
use crate::domain::common::{ClientId, DomainError, InvoiceId, Page, PageRequest, UserId};
use crate::domain::invoice::{CommercialDocument, Invoice, InvoiceService};

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesCommand {
  pub user_id: UserId,
  /// Restrict to one client
  #[serde(default)]
  pub client_id: Option<ClientId>,
  /// Invoice number or client name
  #[serde(default)]
  pub query: Option<String>,
  #[serde(default)]
  pub overdue_only: bool,
  #[serde(default)]
  pub page: Option<usize>,
  #[serde(default)]
  pub per_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceListItemDto {
  pub id: InvoiceId,
  pub number: String,
  pub client_id: ClientId,
  pub client_name: String,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub status: String,
  pub total_ttc: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Page<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
  client_service: Arc<ClientService>,
  page_size: usize,
}

impl ListInvoicesUseCase {
  pub fn new(
    invoice_service: Arc<InvoiceService>,
    client_service: Arc<ClientService>,
    page_size: usize,
  ) -> Self {
    Self {
      invoice_service,
      client_service,
      page_size,
    }
  }

  /// Lists the user's invoices. Filters combine: search query, client and
  /// overdue-only all narrow the same listing.
  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, DomainError> {
    let mut invoices = if command.overdue_only {
      self.invoice_service.list_overdue(command.user_id).await?
    } else {
      self.invoice_service.list_by_user(command.user_id).await?
    };

    if let Some(query) = command.query.as_deref() {
      let matching: HashSet<InvoiceId> = self
        .invoice_service
        .search(command.user_id, query)
        .await?
        .into_iter()
        .map(|invoice| invoice.id)
        .collect();
      invoices.retain(|invoice| matching.contains(&invoice.id));
    }
    if let Some(client_id) = command.client_id {
      invoices.retain(|invoice| invoice.client_id == client_id);
    }

    let names: HashMap<ClientId, String> = self
      .client_service
      .list(command.user_id)
      .await?
      .into_iter()
      .map(|client| (client.id, client.full_name()))
      .collect();
    let today = self.invoice_service.today();

    let request = PageRequest::new(
      command.page.unwrap_or(1),
      command.per_page.unwrap_or(self.page_size),
    );
    let page = Page::paginate(invoices, request).map(|invoice: Invoice| InvoiceListItemDto {
      id: invoice.id,
      number: invoice.number.to_string(),
      client_id: invoice.client_id,
      client_name: names.get(&invoice.client_id).cloned().unwrap_or_default(),
      issue_date: invoice.issue_date,
      due_date: invoice.due_date,
      status: invoice.effective_status(today).as_str().to_string(),
      total_ttc: cents(invoice.totals().total_ttc),
    });

    Ok(ListInvoicesResponse { invoices: page })
  }
}
