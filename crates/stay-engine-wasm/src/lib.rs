//! WASM bindings for stay-engine.
//!
//! Exposes the availability store to a browser booking form via
//! `wasm-bindgen`: the date picker asks `isBlocked` for every cell it renders,
//! and the submit handler calls `checkOverlap` before `add` or `update`.
//! Dates cross the boundary as strings in any layout `parse_date` accepts;
//! lists come back as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/stay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use stay_engine::range::CANONICAL_FORMAT;
use stay_engine::{AvailabilityStore, BookingId, Clock, Conflict, DateRange, PropertyId};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDto {
    booking_id: u64,
    start_date: String,
    end_date: String,
    shared_days: u32,
}

impl From<&Conflict> for ConflictDto {
    fn from(c: &Conflict) -> Self {
        Self {
            booking_id: c.booking.0,
            start_date: c.range.start().format(CANONICAL_FORMAT).to_string(),
            end_date: c.range.end().format(CANONICAL_FORMAT).to_string(),
            shared_days: c.shared_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_day(s: &str) -> Result<NaiveDate, JsValue> {
    stay_engine::parse_date(s).map_err(js_err)
}

fn parse_range(start: &str, end: &str) -> Result<DateRange, JsValue> {
    stay_engine::normalize(start, end).map_err(js_err)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Nights between two dates; zero for a same-day stay.
#[wasm_bindgen]
pub fn nights(start: &str, end: &str) -> Result<u32, JsValue> {
    Ok(parse_range(start, end)?.nights())
}

/// A booking store owned by the JavaScript side.
#[wasm_bindgen]
pub struct AvailabilityHandle {
    store: AvailabilityStore,
}

#[wasm_bindgen]
impl AvailabilityHandle {
    /// Load a host catalog (`[{hostId, name, dailyPrice, blockedDates}]`).
    ///
    /// `today` pins the reference date; when omitted the host's local date is
    /// used.
    #[wasm_bindgen(js_name = "fromCatalog")]
    pub fn from_catalog(json: &str, today: Option<String>) -> Result<AvailabilityHandle, JsValue> {
        let clock = match today {
            Some(raw) => Clock::Fixed(parse_day(&raw)?),
            None => Clock::Local,
        };
        let store = stay_engine::load_catalog(json, clock).map_err(js_err)?;
        Ok(AvailabilityHandle { store })
    }

    /// Disabled-date check for a calendar cell.
    ///
    /// Returns `undefined` for an unknown property: nothing is known about it
    /// yet, which is not the same as nothing being blocked.
    #[wasm_bindgen(js_name = "isBlocked")]
    pub fn is_blocked(&self, property_id: u64, date: &str) -> Result<Option<bool>, JsValue> {
        let day = parse_day(date)?;
        Ok(self
            .store
            .disabled_date_predicate(PropertyId(property_id))
            .map(|blocked| blocked.is_blocked(day)))
    }

    /// Every disabled day in `[from, to]` as a JSON array of `MM-DD-YYYY`.
    #[wasm_bindgen(js_name = "blockedDays")]
    pub fn blocked_days(&self, property_id: u64, from: &str, to: &str) -> Result<String, JsValue> {
        let window = parse_range(from, to)?;
        let blocked = self
            .store
            .disabled_date_predicate(PropertyId(property_id))
            .ok_or_else(|| js_err(stay_engine::StayError::PropertyNotFound(PropertyId(property_id))))?;
        let days: Vec<String> = blocked
            .blocked_days(&window)
            .into_iter()
            .map(|d| d.format(CANONICAL_FORMAT).to_string())
            .collect();
        to_json(&days)
    }

    /// Conflicting bookings as a JSON array; `[]` means the dates are free.
    ///
    /// Pass the id of the booking being edited as `exclude`.
    #[wasm_bindgen(js_name = "checkOverlap")]
    pub fn check_overlap(
        &self,
        property_id: u64,
        start: &str,
        end: &str,
        exclude: Option<u64>,
    ) -> Result<String, JsValue> {
        let range = parse_range(start, end)?;
        let conflicts = self
            .store
            .conflicts(PropertyId(property_id), &range, exclude.map(BookingId))
            .map_err(js_err)?;
        let dtos: Vec<ConflictDto> = conflicts.iter().map(ConflictDto::from).collect();
        to_json(&dtos)
    }

    /// Book a stay; returns the new booking id.
    pub fn add(&mut self, property_id: u64, start: &str, end: &str) -> Result<u64, JsValue> {
        let range = parse_range(start, end)?;
        self.store
            .add(PropertyId(property_id), range)
            .map(|id| id.0)
            .map_err(js_err)
    }

    /// Move a booking to new dates.
    pub fn update(
        &mut self,
        property_id: u64,
        booking_id: u64,
        start: &str,
        end: &str,
    ) -> Result<(), JsValue> {
        let range = parse_range(start, end)?;
        self.store
            .update(PropertyId(property_id), BookingId(booking_id), range)
            .map_err(js_err)
    }

    /// Delete a booking.
    pub fn remove(&mut self, property_id: u64, booking_id: u64) -> Result<(), JsValue> {
        self.store
            .remove(PropertyId(property_id), BookingId(booking_id))
            .map(|_| ())
            .map_err(js_err)
    }

    /// Current catalog as JSON, in the same shape `fromCatalog` reads.
    #[wasm_bindgen(js_name = "toCatalog")]
    pub fn to_catalog(&self) -> Result<String, JsValue> {
        stay_engine::export_catalog(&self.store).map_err(js_err)
    }
}
