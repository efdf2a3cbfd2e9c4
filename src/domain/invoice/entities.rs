use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::document::{
  CommercialDocument, DocumentLine, DocumentTotals, drop_line, push_line, validate_lines,
};
use super::value_objects::{DocumentNumber, InvoiceNumber, InvoiceStatus, QuoteStatus};
use crate::domain::common::{
  ClientId, ConflictReason, DomainError, InvoiceId, LineId, QuoteId, UserId, ValidationError,
};

fn check_date_order(issue: NaiveDate, due: NaiveDate) -> Result<(), ValidationError> {
  if due <= issue {
    return Err(ValidationError::DateOrder);
  }
  Ok(())
}

// ============================================================================
// Invoice
// ============================================================================

/// Everything needed to issue a new invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
  pub user_id: UserId,
  pub client_id: ClientId,
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub lines: Vec<DocumentLine>,
}

/// Partial invoice edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceChanges {
  pub client_id: Option<ClientId>,
  pub issue_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub lines: Option<Vec<DocumentLine>>,
  pub status: Option<InvoiceStatus>,
}

impl InvoiceChanges {
  /// Only asks to keep the invoice paid, which is the one edit a paid
  /// invoice accepts (as a no-op)
  fn only_keeps_paid(&self) -> bool {
    self.status == Some(InvoiceStatus::Paid)
      && self.client_id.is_none()
      && self.issue_date.is_none()
      && self.due_date.is_none()
      && self.lines.is_none()
  }
}

/// Invoice issued by a user to one of their clients.
/// Lines are never empty and totals always match them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRecord")]
pub struct Invoice {
  pub id: InvoiceId,
  pub user_id: UserId,
  pub client_id: ClientId,
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  status: InvoiceStatus,
  paid_at: Option<DateTime<Utc>>,
  lines: Vec<DocumentLine>,
  #[serde(flatten)]
  totals: DocumentTotals,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Stored shape of an invoice. Totals are not read back, they are recomputed.
#[derive(Deserialize)]
struct InvoiceRecord {
  id: InvoiceId,
  user_id: UserId,
  client_id: ClientId,
  number: InvoiceNumber,
  issue_date: NaiveDate,
  due_date: NaiveDate,
  status: InvoiceStatus,
  paid_at: Option<DateTime<Utc>>,
  lines: Vec<DocumentLine>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRecord> for Invoice {
  type Error = ValidationError;

  fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
    let totals = DocumentTotals::try_from_lines(&record.lines)?;
    Ok(Self {
      id: record.id,
      user_id: record.user_id,
      client_id: record.client_id,
      number: record.number,
      issue_date: record.issue_date,
      due_date: record.due_date,
      status: record.status,
      paid_at: record.paid_at,
      lines: record.lines,
      totals,
      created_at: record.created_at,
      updated_at: record.updated_at,
    })
  }
}

impl Invoice {
  /// Creates a draft invoice after checking date order, then the lines
  pub fn new(data: NewInvoice, now: DateTime<Utc>) -> Result<Self, ValidationError> {
    check_date_order(data.issue_date, data.due_date)?;
    validate_lines(&data.lines)?;

    let totals = DocumentTotals::from_lines(&data.lines);
    Ok(Self {
      id: InvoiceId::new(),
      user_id: data.user_id,
      client_id: data.client_id,
      number: data.number,
      issue_date: data.issue_date,
      due_date: data.due_date,
      status: InvoiceStatus::Draft,
      paid_at: None,
      lines: data.lines,
      totals,
      created_at: now,
      updated_at: now,
    })
  }

  /// Stored status, never `Overdue`
  pub fn status(&self) -> InvoiceStatus {
    self.status
  }

  pub fn paid_at(&self) -> Option<DateTime<Utc>> {
    self.paid_at
  }

  pub fn is_paid(&self) -> bool {
    self.status == InvoiceStatus::Paid
  }

  /// Unpaid, not cancelled and past its due date
  pub fn is_overdue(&self, today: NaiveDate) -> bool {
    !matches!(self.status, InvoiceStatus::Paid | InvoiceStatus::Cancelled) && self.due_date < today
  }

  /// Status as shown to users, with `Overdue` derived from `today`
  pub fn effective_status(&self, today: NaiveDate) -> InvoiceStatus {
    if self.is_overdue(today) {
      InvoiceStatus::Overdue
    } else {
      self.status
    }
  }

  /// Merges an edit. All checks run before any field changes.
  ///
  /// # Errors
  /// `ConflictReason::InvoicePaid` for any edit of a paid invoice other than
  /// keeping it paid. Date order and line rules as on creation. Status moves
  /// follow [`InvoiceStatus::can_transition_to`].
  pub fn apply(&mut self, changes: InvoiceChanges, now: DateTime<Utc>) -> Result<(), DomainError> {
    if self.is_paid() {
      if changes.only_keeps_paid() {
        return Ok(());
      }
      return Err(ConflictReason::InvoicePaid.into());
    }

    let issue_date = changes.issue_date.unwrap_or(self.issue_date);
    let due_date = changes.due_date.unwrap_or(self.due_date);
    check_date_order(issue_date, due_date)?;

    if let Some(lines) = &changes.lines {
      validate_lines(lines)?;
    }
    if let Some(status) = changes.status {
      self.check_transition(status)?;
    }

    if let Some(client_id) = changes.client_id {
      self.client_id = client_id;
    }
    self.issue_date = issue_date;
    self.due_date = due_date;
    if let Some(lines) = changes.lines {
      self.lines = lines;
      self.compute_totals();
    }
    if let Some(status) = changes.status {
      self.set_status(status, now);
    }

    self.updated_at = now;
    Ok(())
  }

  /// Moves the invoice to `status` through the transition rules
  pub fn transition_to(
    &mut self,
    status: InvoiceStatus,
    now: DateTime<Utc>,
  ) -> Result<(), ConflictReason> {
    self.check_transition(status)?;
    if status != self.status {
      self.set_status(status, now);
      self.updated_at = now;
    }
    Ok(())
  }

  pub fn mark_paid(&mut self, now: DateTime<Utc>) -> Result<(), ConflictReason> {
    self.transition_to(InvoiceStatus::Paid, now)
  }

  /// Sends a draft, or reverses a payment recorded by mistake
  pub fn mark_sent(&mut self, now: DateTime<Utc>) -> Result<(), ConflictReason> {
    self.transition_to(InvoiceStatus::Sent, now)
  }

  pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), ConflictReason> {
    if self.is_paid() {
      return Err(ConflictReason::InvoicePaid);
    }
    self.transition_to(InvoiceStatus::Cancelled, now)
  }

  fn check_transition(&self, next: InvoiceStatus) -> Result<(), ConflictReason> {
    if !self.status.can_transition_to(next) {
      return Err(ConflictReason::InvalidStatusTransition {
        from: self.status.to_string(),
        to: next.to_string(),
      });
    }
    Ok(())
  }

  fn set_status(&mut self, status: InvoiceStatus, now: DateTime<Utc>) {
    if status == self.status {
      return;
    }
    self.paid_at = match status {
      InvoiceStatus::Paid => Some(now),
      _ => None,
    };
    self.status = status;
  }
}

impl CommercialDocument for Invoice {
  fn lines(&self) -> &[DocumentLine] {
    &self.lines
  }

  fn totals(&self) -> DocumentTotals {
    self.totals
  }

  fn compute_totals(&mut self) {
    self.totals = DocumentTotals::from_lines(&self.lines);
  }

  fn add_line(&mut self, line: DocumentLine) -> Result<(), ValidationError> {
    push_line(&mut self.lines, line)?;
    self.compute_totals();
    Ok(())
  }

  fn remove_line(&mut self, line_id: LineId) -> Result<bool, ValidationError> {
    let removed = drop_line(&mut self.lines, line_id)?;
    self.compute_totals();
    Ok(removed)
  }
}

// ============================================================================
// Quote
// ============================================================================

/// Quote ("devis") sent to a client before invoicing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuoteRecord")]
pub struct Quote {
  pub id: QuoteId,
  pub user_id: UserId,
  pub client_id: ClientId,
  pub number: DocumentNumber,
  pub issue_date: NaiveDate,
  pub valid_until: NaiveDate,
  status: QuoteStatus,
  lines: Vec<DocumentLine>,
  #[serde(flatten)]
  totals: DocumentTotals,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct QuoteRecord {
  id: QuoteId,
  user_id: UserId,
  client_id: ClientId,
  number: DocumentNumber,
  issue_date: NaiveDate,
  valid_until: NaiveDate,
  status: QuoteStatus,
  lines: Vec<DocumentLine>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<QuoteRecord> for Quote {
  type Error = ValidationError;

  fn try_from(record: QuoteRecord) -> Result<Self, Self::Error> {
    let totals = DocumentTotals::try_from_lines(&record.lines)?;
    Ok(Self {
      id: record.id,
      user_id: record.user_id,
      client_id: record.client_id,
      number: record.number,
      issue_date: record.issue_date,
      valid_until: record.valid_until,
      status: record.status,
      lines: record.lines,
      totals,
      created_at: record.created_at,
      updated_at: record.updated_at,
    })
  }
}

impl Quote {
  pub fn new(
    user_id: UserId,
    client_id: ClientId,
    number: DocumentNumber,
    issue_date: NaiveDate,
    valid_until: NaiveDate,
    lines: Vec<DocumentLine>,
    now: DateTime<Utc>,
  ) -> Result<Self, ValidationError> {
    check_date_order(issue_date, valid_until)?;
    validate_lines(&lines)?;

    let totals = DocumentTotals::from_lines(&lines);
    Ok(Self {
      id: QuoteId::new(),
      user_id,
      client_id,
      number,
      issue_date,
      valid_until,
      status: QuoteStatus::Draft,
      lines,
      totals,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn status(&self) -> QuoteStatus {
    self.status
  }

  pub fn is_expired(&self, today: NaiveDate) -> bool {
    matches!(self.status, QuoteStatus::Draft | QuoteStatus::Sent) && self.valid_until < today
  }

  pub fn transition_to(
    &mut self,
    status: QuoteStatus,
    now: DateTime<Utc>,
  ) -> Result<(), ConflictReason> {
    if !self.status.can_transition_to(status) {
      return Err(ConflictReason::InvalidStatusTransition {
        from: self.status.to_string(),
        to: status.to_string(),
      });
    }
    if status != self.status {
      self.status = status;
      self.updated_at = now;
    }
    Ok(())
  }
}

impl CommercialDocument for Quote {
  fn lines(&self) -> &[DocumentLine] {
    &self.lines
  }

  fn totals(&self) -> DocumentTotals {
    self.totals
  }

  fn compute_totals(&mut self) {
    self.totals = DocumentTotals::from_lines(&self.lines);
  }

  fn add_line(&mut self, line: DocumentLine) -> Result<(), ValidationError> {
    push_line(&mut self.lines, line)?;
    self.compute_totals();
    Ok(())
  }

  fn remove_line(&mut self, line_id: LineId) -> Result<bool, ValidationError> {
    let removed = drop_line(&mut self.lines, line_id)?;
    self.compute_totals();
    Ok(removed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::value_objects::DocumentKind;
  use chrono::TimeZone;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
  }

  fn draft() -> Invoice {
    Invoice::new(
      NewInvoice {
        user_id: UserId::new(),
        client_id: ClientId::new(),
        number: DocumentNumber::new(DocumentKind::Invoice, 2024, 1),
        issue_date: date(2024, 1, 10),
        due_date: date(2024, 2, 10),
        lines: vec![
          DocumentLine::new("Conseil", dec!(2), dec!(500), dec!(20)),
          DocumentLine::new("Formation", dec!(1), dec!(300), dec!(20)),
        ],
      },
      now(),
    )
    .unwrap()
  }

  #[test]
  fn test_new_invoice_is_draft_with_totals() {
    let invoice = draft();
    assert_eq!(invoice.status(), InvoiceStatus::Draft);
    assert_eq!(invoice.totals().total_ht, dec!(1300));
    assert_eq!(invoice.totals().total_tva, dec!(260));
    assert_eq!(invoice.totals().total_ttc, dec!(1560));
  }

  #[test]
  fn test_new_invoice_checks_dates_before_lines() {
    let err = Invoice::new(
      NewInvoice {
        user_id: UserId::new(),
        client_id: ClientId::new(),
        number: DocumentNumber::new(DocumentKind::Invoice, 2024, 1),
        issue_date: date(2024, 1, 10),
        due_date: date(2024, 1, 10),
        lines: vec![],
      },
      now(),
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::DateOrder);
  }

  #[test]
  fn test_paid_invoice_rejects_edits() {
    let mut invoice = draft();
    invoice.mark_paid(now()).unwrap();
    assert_eq!(invoice.paid_at(), Some(now()));

    let err = invoice
      .apply(
        InvoiceChanges {
          due_date: Some(date(2024, 3, 1)),
          ..Default::default()
        },
        now(),
      )
      .unwrap_err();
    assert_eq!(err.code(), "invoice_paid");

    // Keeping it paid is accepted and changes nothing
    let before = invoice.clone();
    invoice
      .apply(
        InvoiceChanges {
          status: Some(InvoiceStatus::Paid),
          ..Default::default()
        },
        Utc::now(),
      )
      .unwrap();
    assert_eq!(invoice, before);

    assert_eq!(invoice.cancel(now()), Err(ConflictReason::InvoicePaid));
  }

  #[test]
  fn test_payment_reversal_clears_paid_at() {
    let mut invoice = draft();
    invoice.mark_paid(now()).unwrap();
    invoice.mark_sent(now()).unwrap();

    assert_eq!(invoice.status(), InvoiceStatus::Sent);
    assert!(invoice.paid_at().is_none());
  }

  #[test]
  fn test_apply_is_all_or_nothing() {
    let mut invoice = draft();
    let err = invoice
      .apply(
        InvoiceChanges {
          due_date: Some(date(2024, 5, 1)),
          lines: Some(vec![DocumentLine::new("x", dec!(-1), dec!(1), dec!(0))]),
          ..Default::default()
        },
        now(),
      )
      .unwrap_err();

    assert_eq!(err.code(), "quantity");
    assert_eq!(invoice.due_date, date(2024, 2, 10));
    assert_eq!(invoice.lines().len(), 2);
  }

  #[test]
  fn test_apply_replaces_lines_and_recomputes() {
    let mut invoice = draft();
    invoice
      .apply(
        InvoiceChanges {
          lines: Some(vec![DocumentLine::new("Audit", dec!(1), dec!(100), dec!(10))]),
          status: Some(InvoiceStatus::Sent),
          ..Default::default()
        },
        now(),
      )
      .unwrap();

    assert_eq!(invoice.totals().total_ttc, dec!(110));
    assert_eq!(invoice.status(), InvoiceStatus::Sent);
  }

  #[test]
  fn test_cancelled_is_terminal() {
    let mut invoice = draft();
    invoice.cancel(now()).unwrap();
    let err = invoice.mark_sent(now()).unwrap_err();
    assert_eq!(err.code(), "invalid_status_transition");
  }

  #[test]
  fn test_overdue_is_derived() {
    let mut invoice = draft();
    assert_eq!(invoice.effective_status(date(2024, 2, 10)), InvoiceStatus::Draft);
    assert_eq!(invoice.effective_status(date(2024, 2, 11)), InvoiceStatus::Overdue);

    invoice.mark_paid(now()).unwrap();
    assert!(!invoice.is_overdue(date(2025, 1, 1)));
    assert_eq!(invoice.status(), InvoiceStatus::Paid);
  }

  #[test]
  fn test_line_editing_keeps_totals_in_sync() {
    let mut invoice = draft();
    let line = DocumentLine::new("Support", dec!(4), dec!(25), dec!(20));
    let line_id = line.id;

    invoice.add_line(line).unwrap();
    assert_eq!(invoice.totals().total_ht, dec!(1400));

    assert!(invoice.remove_line(line_id).unwrap());
    assert_eq!(invoice.totals().total_ht, dec!(1300));

    let bad = DocumentLine::new("bad", dec!(1), dec!(1), dec!(101));
    assert_eq!(invoice.add_line(bad), Err(ValidationError::TaxRate { line: 3 }));
  }

  #[test]
  fn test_deserialization_recomputes_totals() {
    let invoice = draft();
    let mut json = serde_json::to_value(&invoice).unwrap();
    assert!(json.get("total_ttc").is_some());

    json["total_ttc"] = serde_json::json!("1");
    let restored: Invoice = serde_json::from_value(json).unwrap();
    assert_eq!(restored.totals().total_ttc, dec!(1560));
    assert_eq!(restored, invoice);
  }

  #[test]
  fn test_deserialization_rejects_overflowing_lines() {
    let mut json = serde_json::to_value(draft()).unwrap();
    json["lines"][0]["unit_price"] = serde_json::json!(Decimal::MAX.to_string());

    let err = serde_json::from_value::<Invoice>(json).unwrap_err();
    assert!(err.to_string().contains("amount is too large"));
  }

  #[test]
  fn test_quote_shares_document_behavior() {
    let mut quote = Quote::new(
      UserId::new(),
      ClientId::new(),
      DocumentNumber::new(DocumentKind::Quote, 2024, 3),
      date(2024, 1, 1),
      date(2024, 1, 31),
      vec![DocumentLine::new("Devis", dec!(1), dec!(1000), dec!(20))],
      now(),
    )
    .unwrap();

    assert_eq!(quote.number.as_str(), "DEV-2024-003");
    assert_eq!(quote.totals().total_ttc, dec!(1200));

    quote
      .add_line(DocumentLine::new("Option", dec!(1), dec!(100), dec!(20)))
      .unwrap();
    assert_eq!(quote.totals().total_ttc, dec!(1320));

    assert!(quote.is_expired(date(2024, 2, 1)));
    quote.transition_to(QuoteStatus::Sent, now()).unwrap();
    quote.transition_to(QuoteStatus::Accepted, now()).unwrap();
    assert!(!quote.is_expired(date(2024, 2, 1)));
  }
}
