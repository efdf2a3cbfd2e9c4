use serde::Deserialize;
use std::sync::Arc;

use crate::domain::common::{DomainError, InvoiceId};
use crate::domain::invoice::InvoiceService;

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: InvoiceId,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Deletes an unpaid invoice. Its number is never handed out again.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<(), DomainError> {
    self.invoice_service.delete(command.invoice_id).await
  }
}
