use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::common::ValidationError;

// ============================================================================
// Invoice Status
// ============================================================================

/// Lifecycle of an invoice. `Overdue` is never stored: it is derived from the
/// due date, see [`super::entities::Invoice::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
  Draft,
  Sent,
  Paid,
  Overdue,
  Cancelled,
}

impl InvoiceStatus {
  /// Whether an explicit status change from `self` to `next` is allowed.
  /// Staying on the same stored status is always allowed.
  pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
    use InvoiceStatus::*;

    match (self, next) {
      (_, Overdue) => false,
      (current, next) if *current == next => true,
      (Draft, Sent | Paid | Cancelled) => true,
      (Sent, Paid | Cancelled) => true,
      // Corrective reversal of a payment recorded by mistake
      (Paid, Sent) => true,
      _ => false,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, InvoiceStatus::Cancelled)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Draft => "DRAFT",
      InvoiceStatus::Sent => "SENT",
      InvoiceStatus::Paid => "PAID",
      InvoiceStatus::Overdue => "OVERDUE",
      InvoiceStatus::Cancelled => "CANCELLED",
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "DRAFT" => Ok(InvoiceStatus::Draft),
      "SENT" => Ok(InvoiceStatus::Sent),
      "PAID" => Ok(InvoiceStatus::Paid),
      "OVERDUE" => Ok(InvoiceStatus::Overdue),
      "CANCELLED" => Ok(InvoiceStatus::Cancelled),
      _ => Err(ValidationError::InvalidField {
        field: "status".to_string(),
      }),
    }
  }
}

// ============================================================================
// Quote Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
  Draft,
  Sent,
  Accepted,
  Rejected,
}

impl QuoteStatus {
  pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
    use QuoteStatus::*;

    matches!(
      (self, next),
      (Draft, Sent) | (Sent, Accepted) | (Sent, Rejected)
    ) || *self == next
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      QuoteStatus::Draft => "DRAFT",
      QuoteStatus::Sent => "SENT",
      QuoteStatus::Accepted => "ACCEPTED",
      QuoteStatus::Rejected => "REJECTED",
    }
  }
}

impl fmt::Display for QuoteStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ============================================================================
// Document Number
// ============================================================================

/// Kind of commercial document, which decides the number prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
  Invoice,
  Quote,
}

impl DocumentKind {
  pub fn prefix(&self) -> &'static str {
    match self {
      DocumentKind::Invoice => "FAC",
      DocumentKind::Quote => "DEV",
    }
  }
}

lazy_static! {
  static ref NUMBER_REGEX: Regex =
    Regex::new(r"^(FAC|DEV)-(\d{4})-(\d{3,})$").expect("valid document number regex");
}

/// Sequential document number such as `FAC-2024-001`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

/// Invoice numbers use the `FAC` prefix
pub type InvoiceNumber = DocumentNumber;

impl DocumentNumber {
  /// Formats `{prefix}-{year}-{seq}` with the sequence zero-padded to 3 digits
  pub fn new(kind: DocumentKind, year: i32, sequence: u32) -> Self {
    Self(format!("{}-{}-{:03}", kind.prefix(), year, sequence))
  }

  /// Parses and checks the `{prefix}-{year}-{seq}` shape
  pub fn parse(value: &str) -> Result<Self, ValidationError> {
    let trimmed = value.trim();
    if !NUMBER_REGEX.is_match(trimmed) {
      return Err(ValidationError::InvalidField {
        field: "number".to_string(),
      });
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn kind(&self) -> Option<DocumentKind> {
    match NUMBER_REGEX.captures(&self.0)?.get(1)?.as_str() {
      "FAC" => Some(DocumentKind::Invoice),
      "DEV" => Some(DocumentKind::Quote),
      _ => None,
    }
  }

  pub fn year(&self) -> Option<i32> {
    NUMBER_REGEX.captures(&self.0)?.get(2)?.as_str().parse().ok()
  }

  /// Sequence part, or `None` when the number does not follow the scheme
  pub fn sequence(&self) -> Option<u32> {
    NUMBER_REGEX.captures(&self.0)?.get(3)?.as_str().parse().ok()
  }
}

impl fmt::Display for DocumentNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for DocumentNumber {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invoice_status_transitions() {
    use InvoiceStatus::*;

    assert!(Draft.can_transition_to(Sent));
    assert!(Draft.can_transition_to(Paid));
    assert!(Sent.can_transition_to(Paid));
    assert!(Sent.can_transition_to(Cancelled));
    assert!(Paid.can_transition_to(Sent));
    assert!(Paid.can_transition_to(Paid));

    assert!(!Paid.can_transition_to(Cancelled));
    assert!(!Paid.can_transition_to(Draft));
    assert!(!Cancelled.can_transition_to(Sent));
    assert!(!Sent.can_transition_to(Draft));
    assert!(!Draft.can_transition_to(Overdue));
    assert!(Cancelled.is_terminal());
  }

  #[test]
  fn test_invoice_status_parsing() {
    assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
    assert_eq!(" SENT ".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Sent);
    assert!("archived".parse::<InvoiceStatus>().is_err());
    assert_eq!(
      serde_json::to_string(&InvoiceStatus::Cancelled).unwrap(),
      "\"CANCELLED\""
    );
  }

  #[test]
  fn test_quote_status_transitions() {
    assert!(QuoteStatus::Draft.can_transition_to(QuoteStatus::Sent));
    assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Accepted));
    assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Accepted));
    assert!(!QuoteStatus::Rejected.can_transition_to(QuoteStatus::Sent));
  }

  #[test]
  fn test_document_number_format() {
    let number = DocumentNumber::new(DocumentKind::Invoice, 2024, 1);
    assert_eq!(number.as_str(), "FAC-2024-001");
    assert_eq!(number.sequence(), Some(1));
    assert_eq!(number.year(), Some(2024));
    assert_eq!(number.kind(), Some(DocumentKind::Invoice));

    let wide = DocumentNumber::new(DocumentKind::Quote, 2025, 1234);
    assert_eq!(wide.as_str(), "DEV-2025-1234");
    assert_eq!(wide.sequence(), Some(1234));
  }

  #[test]
  fn test_document_number_parse() {
    assert!(DocumentNumber::parse("FAC-2024-042").is_ok());
    assert!(DocumentNumber::parse("FAC-24-042").is_err());
    assert!(DocumentNumber::parse("INV-2024-001").is_err());
    assert!(DocumentNumber::parse("").is_err());
  }
}
