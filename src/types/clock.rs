//! Source of "today" for cache naming, stale-file cleanup and request date ranges.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt::Debug;

/// Provides the current date.
///
/// The client only ever asks for the date, so a fixed implementation is enough to
/// make cache behaviour deterministic in tests.
pub trait Clock: Debug + Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use seasontology::{Clock, FixedClock};
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// assert_eq!(clock.current_year(), 2024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
