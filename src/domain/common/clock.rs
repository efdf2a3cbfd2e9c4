use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time. Injected into services so tests can pin "now".
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}
