//! Calendar-date ranges: parsing, normalization, night counts, and formatting.
//!
//! Dates are held as [`NaiveDate`] values and compared by value. Textual forms
//! exist only at the edges: [`parse_date`] on the way in, [`DateRange::format`]
//! on the way out.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};

/// Canonical textual form of a single endpoint (`MM-DD-YYYY`).
pub const CANONICAL_FORMAT: &str = "%m-%d-%Y";

/// Date-only layouts accepted by [`parse_date`], tried in order.
///
/// Month-first layouts come before year-first ones; `2023-01-05` cannot match
/// `%m-%d-%Y` because `20` is not a month.
const DATE_FORMATS: &[&str] = &["%m-%d-%Y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date-like string into a calendar date.
///
/// Accepts `MM-DD-YYYY`, `MM/DD/YYYY`, `YYYY-MM-DD`, `YYYY/MM/DD`, RFC 3339
/// datetimes, and naive `YYYY-MM-DDTHH:MM:SS` datetimes. For datetimes the
/// time-of-day is dropped and the date as written is kept.
///
/// # Errors
/// Returns `StayError::InvalidRange` if no accepted layout matches.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ndt.date());
    }

    Err(StayError::InvalidRange(format!(
        "unrecognized date '{}'",
        raw
    )))
}

/// Anything the engine can turn into a calendar date.
pub trait IntoCalendarDate {
    fn into_calendar_date(self) -> Result<NaiveDate>;
}

impl IntoCalendarDate for NaiveDate {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoCalendarDate for NaiveDateTime {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> IntoCalendarDate for DateTime<Tz> {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl IntoCalendarDate for &str {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoCalendarDate for &String {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoCalendarDate for String {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_date(&self)
    }
}

/// An inclusive `[start, end]` span of calendar days with `start <= end`.
///
/// A same-day range (`start == end`) is a zero-night stay that still occupies
/// one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = StayError;

    fn try_from(raw: RawRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range from two dates.
    ///
    /// # Errors
    /// Returns `StayError::InvalidRange` if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(StayError::InvalidRange(format!(
                "end {} is before start {}",
                end.format(CANONICAL_FORMAT),
                start.format(CANONICAL_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parse two date-like inputs into a validated range.
    pub fn normalize(raw_start: impl IntoCalendarDate, raw_end: impl IntoCalendarDate) -> Result<Self> {
        normalize(raw_start, raw_end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole nights between the endpoints; zero for a same-day range.
    pub fn nights(&self) -> u32 {
        (self.end - self.start).num_days() as u32
    }

    /// Calendar days covered, both endpoints included.
    pub fn days(&self) -> u32 {
        self.nights() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inclusive overlap: ranges sharing only an endpoint day DO overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of calendar days both ranges cover (0 when disjoint).
    pub fn shared_days(&self, other: &DateRange) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end - start).num_days() as u32 + 1
    }

    /// Push `end` later if `end` is past the current end. Never shrinks.
    pub(crate) fn extend_end(&mut self, end: NaiveDate) {
        self.end = self.end.max(end);
    }

    /// Every calendar day in the range, in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days() as usize)
    }

    /// Render both endpoints with a `chrono` strftime pattern.
    ///
    /// For display only; never compare the returned strings.
    ///
    /// # Errors
    /// Returns `StayError::InvalidPattern` if `pattern` is not a valid strftime
    /// pattern, or asks for a field a calendar date does not have (`%H`, `%z`).
    pub fn format(&self, pattern: &str) -> Result<(String, String)> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(StayError::InvalidPattern(pattern.to_string()));
        }
        let render = |date: NaiveDate| -> Result<String> {
            let mut out = String::new();
            write!(out, "{}", date.format_with_items(items.iter()))
                .map_err(|_| StayError::InvalidPattern(pattern.to_string()))?;
            Ok(out)
        };
        Ok((render(self.start)?, render(self.end)?))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format(CANONICAL_FORMAT),
            self.end.format(CANONICAL_FORMAT)
        )
    }
}

/// Parse two date-like inputs into a validated [`DateRange`].
///
/// # Errors
/// Returns `StayError::InvalidRange` if either endpoint is unparsable or the
/// parsed end falls before the parsed start.
pub fn normalize(raw_start: impl IntoCalendarDate, raw_end: impl IntoCalendarDate) -> Result<DateRange> {
    let start = raw_start.into_calendar_date()?;
    let end = raw_end.into_calendar_date()?;
    DateRange::new(start, end)
}
