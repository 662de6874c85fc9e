//! # stay-engine
//!
//! Date-range availability for rental property bookings.
//!
//! The engine answers the two questions a booking form asks: which calendar
//! days must the date picker disable, and does a proposed stay collide with an
//! existing booking. Dates are compared as calendar values, never as strings,
//! and both endpoints of a stay are inclusive.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stay_engine::{normalize, AvailabilityStore, Clock, Property, PropertyId};
//!
//! let today = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
//! let mut store = AvailabilityStore::with_clock(Clock::Fixed(today));
//! let cabin = PropertyId(1);
//! store.register_property(Property::new(cabin, "Mountain Cabin", 120)).unwrap();
//!
//! store.add(cabin, normalize("12-18-2023", "12-23-2023").unwrap()).unwrap();
//!
//! let clash = normalize("12-20-2023", "12-25-2023").unwrap();
//! assert!(store.check_overlap(cabin, &clash, None).unwrap());
//!
//! let blocked = store.disabled_date_predicate(cabin).unwrap();
//! assert!(blocked.is_blocked(NaiveDate::from_ymd_opt(2023, 12, 20).unwrap()));
//! ```
//!
//! ## Modules
//!
//! - [`range`] — `DateRange`, date parsing, night counts, display formatting
//! - [`blocked`] — Disabled-date predicate derived from booked intervals
//! - [`overlap`] — Inclusive-boundary conflict detection
//! - [`store`] — `AvailabilityStore`: per-property add/update/remove and queries
//! - [`catalog`] — JSON listing catalog import/export
//! - [`clock`] — Reference "today" (local, zoned, or pinned)
//! - [`error`] — Error types

pub mod blocked;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod overlap;
pub mod range;
pub mod store;

pub use blocked::BlockedDates;
pub use catalog::{export_catalog, load_catalog};
pub use clock::Clock;
pub use error::StayError;
pub use overlap::{find_conflicts, overlaps, Conflict};
pub use range::{normalize, parse_date, DateRange};
pub use store::{AvailabilityStore, BookingId, Property, PropertyId, Quote};
