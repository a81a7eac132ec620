//! Calendar clocks.
//!
//! Streaks compare calendar dates, never timestamps. The clock decides what
//! "today" means; [`LocalClock`] reads the device-local date at each call.

use chrono::{Days, Local, NaiveDate};
use std::sync::Mutex;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Today's date, without time-of-day.
    fn today(&self) -> NaiveDate;
}

/// Device-local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable date.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Create a clock that reports `date` until changed.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Move the clock to a new date.
    pub fn set(&self, date: NaiveDate) {
        *self.lock() = date;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut date = self.lock();
        if let Some(next) = date.checked_add_days(Days::new(days)) {
            *date = next;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDate> {
        self.date.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.lock()
    }
}
