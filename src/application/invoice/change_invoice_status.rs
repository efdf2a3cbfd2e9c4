use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::get_invoice_details::InvoiceDto;
use crate::domain::common::{ConflictReason, DomainError, InvoiceId};
use crate::domain::invoice::{InvoiceService, InvoiceStatus};

#[derive(Debug, Deserialize)]
pub struct ChangeInvoiceStatusCommand {
  pub invoice_id: InvoiceId,
  /// PAID, SENT or CANCELLED
  pub new_status: String,
}

#[derive(Debug, Serialize)]
pub struct ChangeInvoiceStatusResponse {
  pub invoice: InvoiceDto,
}

pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Marks an invoice paid, sent (also reverting a payment) or cancelled.
  /// DRAFT and OVERDUE cannot be requested.
  pub async fn execute(
    &self,
    command: ChangeInvoiceStatusCommand,
  ) -> Result<ChangeInvoiceStatusResponse, DomainError> {
    let new_status = InvoiceStatus::from_str(&command.new_status)?;

    let invoice = match new_status {
      InvoiceStatus::Paid => self.invoice_service.mark_as_paid(command.invoice_id).await?,
      InvoiceStatus::Sent => self.invoice_service.mark_as_sent(command.invoice_id).await?,
      InvoiceStatus::Cancelled => self.invoice_service.cancel(command.invoice_id).await?,
      InvoiceStatus::Draft | InvoiceStatus::Overdue => {
        let current = self.invoice_service.get(command.invoice_id).await?;
        return Err(
          ConflictReason::InvalidStatusTransition {
            from: current.status().to_string(),
            to: new_status.to_string(),
          }
          .into(),
        );
      }
    };

    Ok(ChangeInvoiceStatusResponse {
      invoice: InvoiceDto::new(&invoice, self.invoice_service.today()),
    })
  }
}
