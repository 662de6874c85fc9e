//! JSON property catalog: seed a store from listings and export it back.
//!
//! The record shape matches the booking UI's host listings:
//!
//! ```json
//! [{"hostId": 1, "name": "Cabo Frio", "dailyPrice": 150,
//!   "blockedDates": [["12-04-2023", "12-08-2023"]], "bookingIds": [4]}]
//! ```
//!
//! Endpoints may use any layout [`parse_date`](crate::range::parse_date)
//! accepts; exports always use `MM-DD-YYYY`. Unknown fields are ignored.
//!
//! `bookingIds`, when present, runs parallel to `blockedDates` and pins each
//! range to the id it had when exported. Listings without it get fresh ids in
//! file order, numbered after every pinned id in the file.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, StayError};
use crate::range::{normalize, DateRange, CANONICAL_FORMAT};
use crate::store::{AvailabilityStore, BookingId, Property, PropertyId};

/// One listing as it appears in a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub host_id: u64,
    pub name: String,
    #[serde(default)]
    pub daily_price: u64,
    #[serde(default)]
    pub blocked_dates: Vec<[String; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub booking_ids: Vec<u64>,
}

/// Build a store from catalog records.
///
/// Pinned ranges go through [`AvailabilityStore::restore`] first, then the
/// remaining ranges go through [`AvailabilityStore::add`]. Either way an
/// overlapping pair within one listing is rejected.
///
/// # Errors
/// `InvalidCatalog` if a listing's `bookingIds` and `blockedDates` differ in
/// length; `DuplicateBooking` if an id is pinned twice; plus anything
/// `register_property`, `restore` or `add` reject.
pub fn store_from_records(records: &[PropertyRecord], clock: Clock) -> Result<AvailabilityStore> {
    let mut store = AvailabilityStore::with_clock(clock);
    let mut unpinned: Vec<(PropertyId, DateRange)> = Vec::new();

    for record in records {
        let id = PropertyId(record.host_id);
        store.register_property(Property::new(id, record.name.clone(), record.daily_price))?;

        if record.booking_ids.is_empty() {
            for [start, end] in &record.blocked_dates {
                unpinned.push((id, normalize(start, end)?));
            }
            continue;
        }
        if record.booking_ids.len() != record.blocked_dates.len() {
            return Err(StayError::InvalidCatalog(format!(
                "host {} lists {} booking ids for {} blocked ranges",
                record.host_id,
                record.booking_ids.len(),
                record.blocked_dates.len()
            )));
        }
        for (booking, [start, end]) in record.booking_ids.iter().zip(&record.blocked_dates) {
            store.restore(id, BookingId(*booking), normalize(start, end)?)?;
        }
    }

    for (id, range) in unpinned {
        store.add(id, range)?;
    }
    Ok(store)
}

/// Parse a catalog JSON array into a store.
pub fn load_catalog(json: &str, clock: Clock) -> Result<AvailabilityStore> {
    let records: Vec<PropertyRecord> = serde_json::from_str(json)?;
    store_from_records(&records, clock)
}

/// Snapshot a store as catalog records, bookings sorted by date.
pub fn to_records(store: &AvailabilityStore) -> Vec<PropertyRecord> {
    store
        .properties()
        .map(|property| {
            let (booking_ids, blocked_dates) = property
                .bookings()
                .into_iter()
                .map(|(booking, range)| {
                    (
                        booking.0,
                        [
                            range.start().format(CANONICAL_FORMAT).to_string(),
                            range.end().format(CANONICAL_FORMAT).to_string(),
                        ],
                    )
                })
                .unzip();
            PropertyRecord {
                host_id: property.id.0,
                name: property.name.clone(),
                daily_price: property.daily_price,
                blocked_dates,
                booking_ids,
            }
        })
        .collect()
}

/// Pretty-printed catalog JSON for a store.
pub fn export_catalog(store: &AvailabilityStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_records(store))?)
}
