use std::fmt;
use thiserror::Error;

/// Main error type returned by every domain service and use case
#[derive(Debug, Error)]
pub enum DomainError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("{0} not found")]
  NotFound(EntityKind),

  #[error("Conflict: {0}")]
  Conflict(#[from] ConflictReason),

  #[error("Authentication failed: {0}")]
  Auth(#[from] AuthFailure),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Password hashing failed: {0}")]
  Hashing(String),
}

impl DomainError {
  /// Stable machine-readable code, suitable for mapping to UI messages
  pub fn code(&self) -> String {
    match self {
      Self::Validation(e) => e.code().to_string(),
      Self::NotFound(kind) => kind.as_str().to_string(),
      Self::Conflict(reason) => reason.code().to_string(),
      Self::Auth(failure) => failure.code().to_string(),
      Self::Repository(_) => "repository".to_string(),
      Self::Hashing(_) => "hashing".to_string(),
    }
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation(_))
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound(_))
  }

  pub fn is_conflict(&self) -> bool {
    matches!(self, Self::Conflict(_))
  }
}

/// Kinds of entities a lookup can fail to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
  User,
  Client,
  Invoice,
}

impl EntityKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      EntityKind::User => "user",
      EntityKind::Client => "client",
      EntityKind::Invoice => "invoice",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Input validation errors, always raised before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Email cannot be empty")]
  EmptyEmail,

  #[error("Invalid email format")]
  InvalidEmailFormat,

  #[error("Email is too long, maximum {max} characters allowed")]
  EmailTooLong { max: usize },

  #[error("Password cannot be empty")]
  PasswordEmpty,

  #[error("Password too short, minimum {min} characters required")]
  PasswordTooShort { min: usize },

  #[error("Password must contain at least one uppercase letter")]
  PasswordMissingUppercase,

  #[error("Password must contain at least one lowercase letter")]
  PasswordMissingLowercase,

  #[error("Password must contain at least one digit")]
  PasswordMissingDigit,

  #[error("Password must contain at least one special character (@$!%*?&#)")]
  PasswordMissingSpecial,

  #[error("Missing required field: {field}")]
  MissingField { field: &'static str },

  #[error("Invalid field: {field}")]
  InvalidField { field: String },

  #[error("Due date must be after the issue date")]
  DateOrder,

  #[error("Document must contain at least one line")]
  NoLines,

  #[error("Line {line}: quantity must be greater than zero")]
  Quantity { line: usize },

  #[error("Line {line}: unit price cannot be negative")]
  UnitPrice { line: usize },

  #[error("Line {line}: tax rate must be between 0 and 100")]
  TaxRate { line: usize },

  #[error("Line {line}: amount is too large")]
  Amount { line: usize },
}

impl ValidationError {
  pub fn code(&self) -> &'static str {
    match self {
      Self::EmptyEmail => "empty",
      Self::InvalidEmailFormat => "invalid_format",
      Self::EmailTooLong { .. } => "too_long",
      Self::PasswordEmpty => "password_empty",
      Self::PasswordTooShort { .. } => "password_too_short",
      Self::PasswordMissingUppercase => "password_missing_uppercase",
      Self::PasswordMissingLowercase => "password_missing_lowercase",
      Self::PasswordMissingDigit => "password_missing_digit",
      Self::PasswordMissingSpecial => "password_missing_special",
      Self::MissingField { field } => field,
      Self::InvalidField { .. } => "invalid_field",
      Self::DateOrder => "date_order",
      Self::NoLines => "no_lines",
      Self::Quantity { .. } => "quantity",
      Self::UnitPrice { .. } => "unit_price",
      Self::TaxRate { .. } => "tax_rate",
      Self::Amount { .. } => "amount",
    }
  }
}

/// State-based business rules that block an otherwise valid operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
  #[error("Client still has invoices")]
  ClientHasInvoices,

  #[error("Invoice is already paid")]
  InvoicePaid,

  #[error("Email already exists")]
  EmailTaken,

  #[error("Cannot move invoice from {from} to {to}")]
  InvalidStatusTransition { from: String, to: String },
}

impl ConflictReason {
  pub fn code(&self) -> &'static str {
    match self {
      Self::ClientHasInvoices => "client_has_invoices",
      Self::InvoicePaid => "invoice_paid",
      Self::EmailTaken => "email_taken",
      Self::InvalidStatusTransition { .. } => "invalid_status_transition",
    }
  }
}

/// Credential failures. Deliberately carries no detail about which part failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
  #[error("Invalid credentials provided")]
  InvalidCredentials,
}

impl AuthFailure {
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidCredentials => "invalid_credentials",
    }
  }
}

/// Persistence collaborator errors, propagated to callers unchanged
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Storage failure: {0}")]
  Storage(String),
}
