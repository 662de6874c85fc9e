//! Per-property booking intervals and the operations the UI layer calls.
//!
//! Every mutation validates first and applies second, so a rejected call
//! leaves the store exactly as it was. Derived views ([`BlockedDates`],
//! conflict lists, quotes) are recomputed from current state on every call.

use std::collections::BTreeMap;
use std::fmt;

use crate::blocked::{self, BlockedDates};
use crate::clock::Clock;
use crate::error::{Result, StayError};
use crate::overlap::{self, Conflict};
use crate::range::DateRange;

/// Identifier of a rentable property (a "host" listing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u64);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one booked interval, unique across the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rentable property and the intervals booked against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    /// Price per night, in whole currency units.
    pub daily_price: u64,
    bookings: BTreeMap<BookingId, DateRange>,
}

impl Property {
    pub fn new(id: PropertyId, name: impl Into<String>, daily_price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            daily_price,
            bookings: BTreeMap::new(),
        }
    }

    pub fn booking(&self, id: BookingId) -> Option<DateRange> {
        self.bookings.get(&id).copied()
    }

    /// Bookings ordered by their dates (then by id).
    pub fn bookings(&self) -> Vec<(BookingId, DateRange)> {
        let mut list: Vec<(BookingId, DateRange)> =
            self.bookings.iter().map(|(id, range)| (*id, *range)).collect();
        list.sort_by_key(|(id, range)| (*range, *id));
        list
    }

    pub fn intervals(&self) -> impl Iterator<Item = &DateRange> {
        self.bookings.values()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn conflicts(&self, candidate: &DateRange, excluding: Option<BookingId>) -> Vec<Conflict> {
        overlap::find_conflicts(
            candidate,
            self.bookings.iter().map(|(id, range)| (*id, range)),
            excluding,
        )
    }
}

/// Price of a stay at a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: u32,
    pub daily_price: u64,
    pub total_price: u64,
}

/// All properties and their booked intervals.
///
/// Constructed once and handed to whatever needs it; tests build a fresh one
/// per case. Mutations take `&mut self`, so sharing across threads requires
/// an outer lock held across check-and-apply.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityStore {
    properties: BTreeMap<PropertyId, Property>,
    last_booking: u64,
    clock: Clock,
}

impl AvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Register a property. Any bookings already on `property` are dropped;
    /// bookings enter the store only through [`add`](Self::add) or
    /// [`restore`](Self::restore).
    ///
    /// # Errors
    /// Returns `StayError::DuplicateProperty` if the id is already registered.
    pub fn register_property(&mut self, mut property: Property) -> Result<()> {
        if self.properties.contains_key(&property.id) {
            return Err(StayError::DuplicateProperty(property.id));
        }
        property.bookings.clear();
        self.properties.insert(property.id, property);
        Ok(())
    }

    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    fn property_or_err(&self, id: PropertyId) -> Result<&Property> {
        self.properties
            .get(&id)
            .ok_or(StayError::PropertyNotFound(id))
    }

    /// Book `range` at a property.
    ///
    /// # Errors
    /// `PropertyNotFound` for an unknown property; `Overlap` (carrying every
    /// conflicting booking) if `range` shares a day with an existing booking.
    pub fn add(&mut self, property_id: PropertyId, range: DateRange) -> Result<BookingId> {
        let id = BookingId(self.last_booking + 1);
        self.insert_checked(property_id, id, range)?;
        Ok(id)
    }

    /// Re-insert a booking under an id it was given earlier, e.g. when
    /// reloading a saved catalog. Later [`add`](Self::add) calls never reuse it.
    ///
    /// # Errors
    /// `PropertyNotFound`; `DuplicateBooking` if any property already holds
    /// `id`; `Overlap` as for `add`.
    pub fn restore(&mut self, property_id: PropertyId, id: BookingId, range: DateRange) -> Result<()> {
        if self.properties.values().any(|p| p.bookings.contains_key(&id)) {
            return Err(StayError::DuplicateBooking(id));
        }
        self.insert_checked(property_id, id, range)
    }

    fn insert_checked(&mut self, property_id: PropertyId, id: BookingId, range: DateRange) -> Result<()> {
        let property = self.property_or_err(property_id)?;
        let conflicts = property.conflicts(&range, None);
        if !conflicts.is_empty() {
            return Err(StayError::Overlap { conflicts });
        }

        if let Some(property) = self.properties.get_mut(&property_id) {
            property.bookings.insert(id, range);
            self.last_booking = self.last_booking.max(id.0);
        }
        Ok(())
    }

    /// Move an existing booking to `new_range`, keeping its id and property.
    ///
    /// The booking's own current dates are excluded from the conflict check.
    ///
    /// # Errors
    /// `PropertyNotFound`, `BookingNotFound`, or `Overlap` against any other
    /// booking of the same property. On error nothing changes.
    pub fn update(&mut self, property_id: PropertyId, booking: BookingId, new_range: DateRange) -> Result<()> {
        let property = self.property_or_err(property_id)?;
        if !property.bookings.contains_key(&booking) {
            return Err(StayError::BookingNotFound {
                property: property_id,
                booking,
            });
        }
        let conflicts = property.conflicts(&new_range, Some(booking));
        if !conflicts.is_empty() {
            return Err(StayError::Overlap { conflicts });
        }

        if let Some(slot) = self
            .properties
            .get_mut(&property_id)
            .and_then(|p| p.bookings.get_mut(&booking))
        {
            *slot = new_range;
        }
        Ok(())
    }

    /// Delete a booking and return the dates it held.
    ///
    /// # Errors
    /// `PropertyNotFound` or `BookingNotFound`; the store is unchanged either way.
    pub fn remove(&mut self, property_id: PropertyId, booking: BookingId) -> Result<DateRange> {
        let property = self
            .properties
            .get_mut(&property_id)
            .ok_or(StayError::PropertyNotFound(property_id))?;
        property
            .bookings
            .remove(&booking)
            .ok_or(StayError::BookingNotFound {
                property: property_id,
                booking,
            })
    }

    /// The calendar's disabled-date predicate for a property.
    ///
    /// `None` when the property is unknown: nothing is known about it yet.
    pub fn disabled_date_predicate(&self, property_id: PropertyId) -> Option<BlockedDates> {
        let property = self.properties.get(&property_id)?;
        Some(blocked::derive(property.intervals(), self.clock.today()))
    }

    /// True if `candidate` conflicts with any booking of the property other
    /// than `excluding`.
    ///
    /// # Errors
    /// `PropertyNotFound` for an unknown property.
    pub fn check_overlap(
        &self,
        property_id: PropertyId,
        candidate: &DateRange,
        excluding: Option<BookingId>,
    ) -> Result<bool> {
        let property = self.property_or_err(property_id)?;
        Ok(match excluding {
            None => overlap::overlaps(candidate, property.intervals()),
            Some(_) => !property.conflicts(candidate, excluding).is_empty(),
        })
    }

    /// Every booking `candidate` would collide with, skipping `excluding`.
    pub fn conflicts(
        &self,
        property_id: PropertyId,
        candidate: &DateRange,
        excluding: Option<BookingId>,
    ) -> Result<Vec<Conflict>> {
        Ok(self.property_or_err(property_id)?.conflicts(candidate, excluding))
    }

    /// Submit-time gate: `Ok(())` if the range is free, `Overlap` otherwise.
    pub fn ensure_available(
        &self,
        property_id: PropertyId,
        candidate: &DateRange,
        excluding: Option<BookingId>,
    ) -> Result<()> {
        let conflicts = self.conflicts(property_id, candidate, excluding)?;
        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(StayError::Overlap { conflicts })
        }
    }

    /// Nights times the property's daily price.
    pub fn quote(&self, property_id: PropertyId, range: &DateRange) -> Result<Quote> {
        let property = self.property_or_err(property_id)?;
        let nights = range.nights();
        Ok(Quote {
            nights,
            daily_price: property.daily_price,
            total_price: property.daily_price.saturating_mul(u64::from(nights)),
        })
    }
}
