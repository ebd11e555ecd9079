//! Calendar month arithmetic
//!
//! Pure functions; the only date logic the rest of the engine is
//! allowed to duplicate nowhere else.

use chrono::{Months, NaiveDate};

use super::{LifecycleError, LifecycleResult};

/// Date `months` calendar months after `date`.
///
/// Preserves the day-of-month when the target month has that day,
/// otherwise clamps to the last valid day (Jan 31 + 1 month → Feb 28,
/// or Feb 29 in a leap year). Zero months returns the input unchanged.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // checked_add_months only fails past year ~262000; saturate there.
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Read-time expiry projection: a membership with no end date never
/// expires; otherwise it is expired strictly after the end date.
pub fn is_expired(end: Option<NaiveDate>, today: NaiveDate) -> bool {
    match end {
        Some(end) => end < today,
        None => false,
    }
}

/// Parse a `YYYY-MM-DD` date string from a request payload
pub fn parse_date(date: &str) -> LifecycleResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| LifecycleError::Validation(format!("Invalid date format: {}", date)))
}
