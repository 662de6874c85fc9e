//! Error types for stay-engine operations.

use thiserror::Error;

use crate::overlap::Conflict;
use crate::store::{BookingId, PropertyId};

#[derive(Error, Debug)]
pub enum StayError {
    /// Unparsable endpoint, or an end date before the start date.
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid date pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The candidate range shares at least one day with existing bookings.
    #[error("Dates are not available: {}", describe_conflicts(.conflicts))]
    Overlap { conflicts: Vec<Conflict> },

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Booking {booking} not found for property {property}")]
    BookingNotFound {
        property: PropertyId,
        booking: BookingId,
    },

    #[error("Property already registered: {0}")]
    DuplicateProperty(PropertyId),

    #[error("Booking id already in use: {0}")]
    DuplicateBooking(BookingId),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_json::Error),
}

fn describe_conflicts(conflicts: &[Conflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("booking {} ({})", c.booking, c.range))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, StayError>;
