use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::get_invoice_details::InvoiceDto;
use crate::domain::common::{ClientId, DomainError, UserId};
use crate::domain::invoice::{DocumentLine, InvoiceDraft, InvoiceService};

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLineInput {
  pub description: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  /// Percentage, 20 means 20 %
  pub tax_rate: Decimal,
}

impl From<InvoiceLineInput> for DocumentLine {
  fn from(input: InvoiceLineInput) -> Self {
    DocumentLine::new(input.description, input.quantity, input.unit_price, input.tax_rate)
  }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub user_id: UserId,
  pub client_id: ClientId,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub lines: Vec<InvoiceLineInput>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub invoice: InvoiceDto,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Issues a draft invoice numbered `FAC-{year}-{seq}`
  ///
  /// # Errors
  /// In order: `NotFound(Client)`, `date_order`, `no_lines`, then per line
  /// `quantity`, `unit_price` and `tax_rate`.
  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, DomainError> {
    let invoice = self
      .invoice_service
      .create(InvoiceDraft {
        user_id: command.user_id,
        client_id: command.client_id,
        issue_date: command.issue_date,
        due_date: command.due_date,
        lines: command.lines.into_iter().map(DocumentLine::from).collect(),
      })
      .await?;

    Ok(CreateInvoiceResponse {
      invoice: InvoiceDto::new(&invoice, self.invoice_service.today()),
    })
  }
}
