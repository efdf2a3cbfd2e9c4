use std::collections::HashMap;
use tokio::sync::RwLock;

use super::seed;
use crate::domain::auth::User;
use crate::domain::client::Client;
use crate::domain::common::{ClientId, InvoiceId, UserId};
use crate::domain::invoice::Invoice;

/// Tables of the in-memory store, one map per entity keyed by id
#[derive(Debug, Default, Clone)]
pub(crate) struct Tables {
  pub users: HashMap<UserId, User>,
  pub clients: HashMap<ClientId, Client>,
  pub invoices: HashMap<InvoiceId, Invoice>,
}

/// Shared in-memory persistence context.
///
/// Repositories hold an `Arc` to it, so everything wired against the same
/// instance sees the same data. A single lock guards all tables, which keeps
/// cross-table reads such as "does this client have invoices" consistent.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
  tables: RwLock<Tables>,
}

impl InMemoryDatabase {
  /// Creates an empty database
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a database holding the demo account, its clients and invoices
  pub fn seeded() -> Self {
    Self {
      tables: RwLock::new(seed::tables()),
    }
  }

  /// Drops everything and reloads the demo data
  pub async fn reset(&self) {
    *self.tables.write().await = seed::tables();
  }

  /// Drops everything
  pub async fn clear(&self) {
    *self.tables.write().await = Tables::default();
  }

  pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, Tables> {
    self.tables.read().await
  }

  pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Tables> {
    self.tables.write().await
  }
}
