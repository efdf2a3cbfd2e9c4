use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::entities::Invoice;
use super::value_objects::DocumentKind;
use crate::domain::common::UserId;

/// Next invoice sequence for `year` among one user's invoices.
///
/// Counts the invoices issued that year, and never goes below the highest
/// sequence already used for that year, so deletions cannot cause reuse.
pub fn next_sequence(invoices: &[Invoice], year: i32) -> u32 {
  let issued = invoices
    .iter()
    .filter(|invoice| invoice.issue_date.year() == year)
    .count();
  let issued = u32::try_from(issued).unwrap_or(u32::MAX);

  let highest = invoices
    .iter()
    .filter(|invoice| {
      invoice.number.kind() == Some(DocumentKind::Invoice) && invoice.number.year() == Some(year)
    })
    .filter_map(|invoice| invoice.number.sequence())
    .max()
    .unwrap_or(0);

  issued.max(highest).saturating_add(1)
}

/// One async lock per (user, year), held across the read-count, compute and
/// write steps of invoice creation.
///
/// Entries nobody holds or waits on are pruned on the next `acquire`, so the
/// map only tracks keys in use.
#[derive(Default)]
pub struct NumberingLocks {
  locks: Mutex<HashMap<(UserId, i32), Arc<Mutex<()>>>>,
}

impl NumberingLocks {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn acquire(&self, user_id: UserId, year: i32) -> OwnedMutexGuard<()> {
    let lock = {
      let mut locks = self.locks.lock().await;
      // guards and waiters keep a clone, a lone map reference is idle
      locks.retain(|_, lock| Arc::strong_count(lock) > 1);
      locks.entry((user_id, year)).or_default().clone()
    };
    lock.lock_owned().await
  }
}
