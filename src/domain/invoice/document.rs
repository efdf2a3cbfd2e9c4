use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::{LineId, ValidationError};

/// One priced line of an invoice or quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
  pub id: LineId,
  pub description: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  /// Percentage, 20 means 20 %
  pub tax_rate: Decimal,
}

impl DocumentLine {
  /// Creates a new line with a fresh id
  pub fn new(
    description: impl Into<String>,
    quantity: Decimal,
    unit_price: Decimal,
    tax_rate: Decimal,
  ) -> Self {
    Self {
      id: LineId::new(),
      description: description.into(),
      quantity,
      unit_price,
      tax_rate,
    }
  }

  /// Amount excluding tax. The line must have passed `validate`.
  pub fn amount_ht(&self) -> Decimal {
    self.quantity * self.unit_price
  }

  /// Tax amount
  pub fn amount_tva(&self) -> Decimal {
    self.amount_ht() * self.tax_rate / Decimal::ONE_HUNDRED
  }

  /// Amount including tax
  pub fn amount_ttc(&self) -> Decimal {
    self.amount_ht() + self.amount_tva()
  }

  /// Line amounts, or `None` when one of them does not fit in a `Decimal`
  fn checked_amounts(&self) -> Option<DocumentTotals> {
    let ht = self.quantity.checked_mul(self.unit_price)?;
    let tva = ht
      .checked_mul(self.tax_rate)?
      .checked_div(Decimal::ONE_HUNDRED)?;
    let ttc = ht.checked_add(tva)?;
    Some(DocumentTotals {
      total_ht: ht,
      total_tva: tva,
      total_ttc: ttc,
    })
  }

  /// `position` is 1-based and only used to point at the faulty line
  pub fn validate(&self, position: usize) -> Result<(), ValidationError> {
    if self.quantity <= Decimal::ZERO {
      return Err(ValidationError::Quantity { line: position });
    }
    if self.unit_price < Decimal::ZERO {
      return Err(ValidationError::UnitPrice { line: position });
    }
    if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
      return Err(ValidationError::TaxRate { line: position });
    }
    if self.checked_amounts().is_none() {
      return Err(ValidationError::Amount { line: position });
    }
    Ok(())
  }
}

/// Checks a full line set: at least one line, then each line in order,
/// then that the running totals stay representable
pub fn validate_lines(lines: &[DocumentLine]) -> Result<(), ValidationError> {
  if lines.is_empty() {
    return Err(ValidationError::NoLines);
  }
  lines
    .iter()
    .enumerate()
    .try_for_each(|(index, line)| line.validate(index + 1))?;
  DocumentTotals::try_from_lines(lines).map(|_| ())
}

/// Sums of the line amounts. Always derived, never set by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
  pub total_ht: Decimal,
  pub total_tva: Decimal,
  pub total_ttc: Decimal,
}

impl DocumentTotals {
  /// Totals of lines that already passed `validate_lines`
  pub fn from_lines(lines: &[DocumentLine]) -> Self {
    lines.iter().fold(Self::default(), |acc, line| Self {
      total_ht: acc.total_ht + line.amount_ht(),
      total_tva: acc.total_tva + line.amount_tva(),
      total_ttc: acc.total_ttc + line.amount_ttc(),
    })
  }

  /// Overflow-checked totals. The error points at the first line whose
  /// amounts, or whose addition to the running sums, overflow.
  pub fn try_from_lines(lines: &[DocumentLine]) -> Result<Self, ValidationError> {
    lines
      .iter()
      .enumerate()
      .try_fold(Self::default(), |acc, (index, line)| {
        line
          .checked_amounts()
          .and_then(|amounts| acc.checked_add(amounts))
          .ok_or(ValidationError::Amount { line: index + 1 })
      })
  }

  fn checked_add(self, other: Self) -> Option<Self> {
    Some(Self {
      total_ht: self.total_ht.checked_add(other.total_ht)?,
      total_tva: self.total_tva.checked_add(other.total_tva)?,
      total_ttc: self.total_ttc.checked_add(other.total_ttc)?,
    })
  }
}

/// Behavior shared by invoices and quotes
pub trait CommercialDocument {
  fn lines(&self) -> &[DocumentLine];

  fn totals(&self) -> DocumentTotals;

  /// Recomputes the stored totals from the current lines
  fn compute_totals(&mut self);

  /// Appends a validated line and refreshes the totals
  fn add_line(&mut self, line: DocumentLine) -> Result<(), ValidationError>;

  /// Removes a line by id and refreshes the totals. Removing the last
  /// remaining line is refused. Returns whether a line was removed.
  fn remove_line(&mut self, line_id: LineId) -> Result<bool, ValidationError>;
}

/// Shared `add_line` body for implementors
pub(crate) fn push_line(
  lines: &mut Vec<DocumentLine>,
  line: DocumentLine,
) -> Result<(), ValidationError> {
  line.validate(lines.len() + 1)?;
  lines.push(line);
  if let Err(err) = DocumentTotals::try_from_lines(lines) {
    lines.pop();
    return Err(err);
  }
  Ok(())
}

/// Shared `remove_line` body for implementors
pub(crate) fn drop_line(
  lines: &mut Vec<DocumentLine>,
  line_id: LineId,
) -> Result<bool, ValidationError> {
  let Some(index) = lines.iter().position(|line| line.id == line_id) else {
    return Ok(false);
  };
  if lines.len() == 1 {
    return Err(ValidationError::NoLines);
  }
  lines.remove(index);
  Ok(true)
}
