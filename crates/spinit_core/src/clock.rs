//! Source of "today" for date-relative views and session bookkeeping.

use chrono::{Local, NaiveDate};

/// Provides the current calendar day. Swapped for a fixed clock in tests.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
