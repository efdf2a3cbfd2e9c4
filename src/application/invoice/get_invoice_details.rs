use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::client::ClientDto;
use crate::domain::client::ClientService;
use crate::domain::common::{ClientId, DomainError, InvoiceId, LineId, UserId};
use crate::domain::invoice::{CommercialDocument, DocumentLine, Invoice, InvoiceService};

/// Rounds a computed amount to cents for display
pub(crate) fn cents(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsCommand {
  pub invoice_id: InvoiceId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLineDto {
  pub id: LineId,
  pub description: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
  pub amount_ht: Decimal,
  pub amount_tva: Decimal,
  pub amount_ttc: Decimal,
}

impl From<&DocumentLine> for InvoiceLineDto {
  fn from(line: &DocumentLine) -> Self {
    Self {
      id: line.id,
      description: line.description.clone(),
      quantity: line.quantity,
      unit_price: line.unit_price,
      tax_rate: line.tax_rate,
      amount_ht: cents(line.amount_ht()),
      amount_tva: cents(line.amount_tva()),
      amount_ttc: cents(line.amount_ttc()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDto {
  pub id: InvoiceId,
  pub user_id: UserId,
  pub client_id: ClientId,
  pub number: String,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  /// Status as of today, OVERDUE included
  pub status: String,
  pub paid_at: Option<DateTime<Utc>>,
  pub lines: Vec<InvoiceLineDto>,
  pub total_ht: Decimal,
  pub total_tva: Decimal,
  pub total_ttc: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl InvoiceDto {
  pub fn new(invoice: &Invoice, today: NaiveDate) -> Self {
    let totals = invoice.totals();
    Self {
      id: invoice.id,
      user_id: invoice.user_id,
      client_id: invoice.client_id,
      number: invoice.number.to_string(),
      issue_date: invoice.issue_date,
      due_date: invoice.due_date,
      status: invoice.effective_status(today).as_str().to_string(),
      paid_at: invoice.paid_at(),
      lines: invoice.lines().iter().map(InvoiceLineDto::from).collect(),
      total_ht: cents(totals.total_ht),
      total_tva: cents(totals.total_tva),
      total_ttc: cents(totals.total_ttc),
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub invoice: InvoiceDto,
  pub client: ClientDto,
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
  client_service: Arc<ClientService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, client_service: Arc<ClientService>) -> Self {
    Self {
      invoice_service,
      client_service,
    }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<InvoiceDetailsResponse, DomainError> {
    let invoice = self.invoice_service.get(command.invoice_id).await?;
    let client = self.client_service.get(invoice.client_id).await?;

    Ok(InvoiceDetailsResponse {
      invoice: InvoiceDto::new(&invoice, self.invoice_service.today()),
      client: client.into(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_cents() {
    assert_eq!(cents(dec!(3.29835)), dec!(3.30));
    assert_eq!(cents(dec!(0.005)), dec!(0.01));
    assert_eq!(cents(dec!(1560)), dec!(1560));
  }
}
