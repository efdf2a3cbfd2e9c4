use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::create_invoice::InvoiceLineInput;
use super::get_invoice_details::InvoiceDto;
use crate::domain::common::{ClientId, DomainError, InvoiceId};
use crate::domain::invoice::{DocumentLine, InvoiceChanges, InvoiceService, InvoiceStatus};

/// Partial edit, absent fields are kept. `lines` replaces every line.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: InvoiceId,
  pub client_id: Option<ClientId>,
  pub issue_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub lines: Option<Vec<InvoiceLineInput>>,
  pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateInvoiceResponse {
  pub invoice: InvoiceDto,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Edits an invoice
  ///
  /// # Errors
  /// `ConflictReason::InvoicePaid` for a paid invoice, unless the command
  /// only restates the PAID status.
  pub async fn execute(
    &self,
    command: UpdateInvoiceCommand,
  ) -> Result<UpdateInvoiceResponse, DomainError> {
    let status = command
      .status
      .as_deref()
      .map(InvoiceStatus::from_str)
      .transpose()?;

    let invoice = self
      .invoice_service
      .update(
        command.invoice_id,
        InvoiceChanges {
          client_id: command.client_id,
          issue_date: command.issue_date,
          due_date: command.due_date,
          lines: command
            .lines
            .map(|lines| lines.into_iter().map(DocumentLine::from).collect()),
          status,
        },
      )
      .await?;

    Ok(UpdateInvoiceResponse {
      invoice: InvoiceDto::new(&invoice, self.invoice_service.today()),
    })
  }
}
