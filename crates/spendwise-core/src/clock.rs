//! Injectable wall clock for calendar-relative calculations

use chrono::NaiveDate;

use crate::models::MonthKey;

/// Source of "today"
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today())
    }
}

/// Local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed date (for tests and reproducible reports)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Calendar month after the current local date, as "YYYY-MM"
pub fn next_month_string() -> String {
    next_month_string_with(&SystemClock)
}

pub fn next_month_string_with(clock: &dyn Clock) -> String {
    clock.current_month().next().to_string()
}
