//! Reference "today" used to block past dates.

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Result, StayError};

/// Where the engine reads the current calendar date from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The host's local wall-clock date.
    #[default]
    Local,
    /// The wall-clock date in an IANA timezone.
    Zoned(Tz),
    /// A pinned date; used by tests and by callers replaying a past day.
    Fixed(NaiveDate),
}

impl Clock {
    /// Build a [`Clock::Zoned`] from an IANA name such as `"America/Sao_Paulo"`.
    ///
    /// # Errors
    /// Returns `StayError::InvalidTimezone` if the name is unknown.
    pub fn zoned(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Clock::Zoned)
            .map_err(|_| StayError::InvalidTimezone(name.to_string()))
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Local => Local::now().date_naive(),
            Clock::Zoned(tz) => Utc::now().with_timezone(tz).date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
