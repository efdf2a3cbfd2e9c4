use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::common::Clock;

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock pinned to one instant, for tests and reproducible demos
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
  pub fn at(instant: DateTime<Utc>) -> Self {
    Self(instant)
  }

  /// Noon UTC on the given day. Panics on an impossible date.
  pub fn ymd(year: i32, month: u32, day: u32) -> Self {
    let date = NaiveDate::from_ymd_opt(year, month, day)
      .unwrap_or_else(|| panic!("invalid date {year}-{month}-{day}"));
    Self(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap_or_default()))
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}
