//! Injectable "today" source
//!
//! Every expiry/renewal decision depends on the current calendar date.
//! Handlers read it through this trait so tests can pin "today" to a
//! literal value instead of the wall clock.

use chrono::NaiveDate;
use chrono_tz::Tz;

pub trait Clock: Send + Sync {
    /// Current calendar date as the business sees it
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the configured business timezone
#[derive(Debug, Clone)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Fixed date, for tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
