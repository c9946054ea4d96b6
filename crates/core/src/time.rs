//! Injected time source.
//!
//! "Now" is supplied through the [`Clock`] trait rather than read from
//! ambient global state, so payment dates and month/year bucketing stay
//! deterministic under test.

use chrono::{DateTime, NaiveDate, Utc};

/// Supplies the current instant for payment dates and audit timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date, derived from [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
