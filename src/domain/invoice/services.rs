use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::document::DocumentLine;
use super::entities::{Invoice, InvoiceChanges, NewInvoice};
use super::numbering::{NumberingLocks, next_sequence};
use super::ports::InvoiceRepository;
use super::value_objects::{DocumentKind, InvoiceNumber};
use crate::domain::client::{Client, ClientRepository};
use crate::domain::common::{
  ClientId, Clock, ConflictReason, DomainError, EntityKind, InvoiceId, UserId,
};

/// Invoice creation data, before numbering
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
  pub user_id: UserId,
  pub client_id: ClientId,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub lines: Vec<DocumentLine>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  client_repo: Arc<dyn ClientRepository>,
  clock: Arc<dyn Clock>,
  numbering: NumberingLocks,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self {
      invoice_repo,
      client_repo,
      clock,
      numbering: NumberingLocks::new(),
    }
  }

  /// Current calendar date, used to derive overdue status
  pub fn today(&self) -> NaiveDate {
    self.clock.today()
  }

  /// Issues a new draft invoice numbered `FAC-{year}-{seq}`
  ///
  /// # Errors
  /// In order: `NotFound(Client)` if the client does not exist or belongs to
  /// another user, then date order, then line validation.
  pub async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, DomainError> {
    self.resolve_client(draft.user_id, draft.client_id).await?;

    let year = draft.issue_date.year();
    let _guard = self.numbering.acquire(draft.user_id, year).await;

    let existing = self.invoice_repo.find_by_user_id(draft.user_id).await?;
    let number = InvoiceNumber::new(DocumentKind::Invoice, year, next_sequence(&existing, year));

    let invoice = Invoice::new(
      NewInvoice {
        user_id: draft.user_id,
        client_id: draft.client_id,
        number,
        issue_date: draft.issue_date,
        due_date: draft.due_date,
        lines: draft.lines,
      },
      self.clock.now(),
    )?;

    let created = self.invoice_repo.create(invoice).await?;
    info!(
      invoice_id = %created.id,
      number = %created.number,
      user_id = %created.user_id,
      "Invoice created"
    );
    Ok(created)
  }

  pub async fn get(&self, id: InvoiceId) -> Result<Invoice, DomainError> {
    self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(DomainError::NotFound(EntityKind::Invoice))
  }

  /// Edits an invoice. A paid invoice only accepts a status-only edit that
  /// keeps it paid.
  pub async fn update(&self, id: InvoiceId, changes: InvoiceChanges) -> Result<Invoice, DomainError> {
    let mut invoice = self.get(id).await?;

    if let Some(client_id) = changes.client_id.filter(|_| !invoice.is_paid()) {
      self.resolve_client(invoice.user_id, client_id).await?;
    }

    if let Err(e) = invoice.apply(changes, self.clock.now()) {
      if e.is_conflict() {
        warn!(invoice_id = %invoice.id, error = %e, "Invoice update rejected");
      }
      return Err(e);
    }

    let updated = self.invoice_repo.update(invoice).await?;
    info!(invoice_id = %updated.id, status = %updated.status(), "Invoice updated");
    Ok(updated)
  }

  pub async fn delete(&self, id: InvoiceId) -> Result<(), DomainError> {
    let invoice = self.get(id).await?;

    if invoice.is_paid() {
      warn!(invoice_id = %invoice.id, "Deletion of paid invoice rejected");
      return Err(ConflictReason::InvoicePaid.into());
    }

    self.invoice_repo.delete(invoice.id).await?;
    info!(invoice_id = %invoice.id, number = %invoice.number, "Invoice deleted");
    Ok(())
  }

  pub async fn mark_as_paid(&self, id: InvoiceId) -> Result<Invoice, DomainError> {
    let mut invoice = self.get(id).await?;
    invoice.mark_paid(self.clock.now())?;
    self.save_status(invoice).await
  }

  /// Sends a draft, or reverses a payment (PAID to SENT)
  pub async fn mark_as_sent(&self, id: InvoiceId) -> Result<Invoice, DomainError> {
    let mut invoice = self.get(id).await?;
    invoice.mark_sent(self.clock.now())?;
    self.save_status(invoice).await
  }

  pub async fn cancel(&self, id: InvoiceId) -> Result<Invoice, DomainError> {
    let mut invoice = self.get(id).await?;
    if let Err(reason) = invoice.cancel(self.clock.now()) {
      warn!(invoice_id = %invoice.id, reason = %reason, "Invoice cancellation rejected");
      return Err(reason.into());
    }
    self.save_status(invoice).await
  }

  /// The user's invoices, by issue date then number
  pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Invoice>, DomainError> {
    let mut invoices = self.invoice_repo.find_by_user_id(user_id).await?;
    sort_invoices(&mut invoices);
    debug!(user_id = %user_id, count = invoices.len(), "Listed invoices");
    Ok(invoices)
  }

  pub async fn list_by_client(&self, client_id: ClientId) -> Result<Vec<Invoice>, DomainError> {
    let mut invoices = self.invoice_repo.find_by_client_id(client_id).await?;
    sort_invoices(&mut invoices);
    Ok(invoices)
  }

  /// Matches the invoice number or the client's name, case-insensitively.
  /// A blank query returns every invoice of the user.
  pub async fn search(&self, user_id: UserId, query: &str) -> Result<Vec<Invoice>, DomainError> {
    let invoices = self.list_by_user(user_id).await?;
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return Ok(invoices);
    }

    let clients: HashMap<ClientId, Client> = self
      .client_repo
      .find_by_user_id(user_id)
      .await?
      .into_iter()
      .map(|client| (client.id, client))
      .collect();

    Ok(
      invoices
        .into_iter()
        .filter(|invoice| {
          invoice.number.as_str().to_lowercase().contains(&needle)
            || clients
              .get(&invoice.client_id)
              .is_some_and(|client| client.matches(&needle))
        })
        .collect(),
    )
  }

  /// Invoices past their due date that are neither paid nor cancelled
  pub async fn list_overdue(&self, user_id: UserId) -> Result<Vec<Invoice>, DomainError> {
    let today = self.today();
    let invoices = self.list_by_user(user_id).await?;
    Ok(
      invoices
        .into_iter()
        .filter(|invoice| invoice.is_overdue(today))
        .collect(),
    )
  }

  /// Looks up a client that `user_id` owns. Someone else's client is
  /// reported exactly like a missing one.
  async fn resolve_client(&self, user_id: UserId, client_id: ClientId) -> Result<Client, DomainError> {
    match self.client_repo.find_by_id(client_id).await? {
      Some(client) if client.user_id == user_id => Ok(client),
      _ => Err(DomainError::NotFound(EntityKind::Client)),
    }
  }

  async fn save_status(&self, invoice: Invoice) -> Result<Invoice, DomainError> {
    let updated = self.invoice_repo.update(invoice).await?;
    info!(invoice_id = %updated.id, status = %updated.status(), "Invoice status changed");
    Ok(updated)
  }
}

fn sort_invoices(invoices: &mut [Invoice]) {
  invoices.sort_by(|a, b| {
    a.issue_date
      .cmp(&b.issue_date)
      .then_with(|| a.number.as_str().cmp(b.number.as_str()))
  });
}
