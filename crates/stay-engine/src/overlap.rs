//! Detect conflicts between a candidate stay and existing bookings.
//!
//! Two ranges overlap when `a.start <= b.end && a.end >= b.start`. Both
//! endpoints are inclusive: a stay starting on another booking's check-out day
//! IS a conflict, because the unit of booking is a whole calendar day.

use crate::range::DateRange;
use crate::store::BookingId;

/// An existing booking that a candidate range collides with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub booking: BookingId,
    pub range: DateRange,
    /// Calendar days the candidate and the booking both cover.
    pub shared_days: u32,
}

/// True if `candidate` overlaps any range in `existing`. Stops at the first hit.
pub fn overlaps<'a>(candidate: &DateRange, existing: impl IntoIterator<Item = &'a DateRange>) -> bool {
    existing.into_iter().any(|range| candidate.overlaps(range))
}

/// Every booking in `existing` that `candidate` overlaps, skipping `excluding`.
///
/// Pass the id of the booking being edited as `excluding` so a booking never
/// conflicts with its own prior dates.
pub fn find_conflicts<'a>(
    candidate: &DateRange,
    existing: impl IntoIterator<Item = (BookingId, &'a DateRange)>,
    excluding: Option<BookingId>,
) -> Vec<Conflict> {
    existing
        .into_iter()
        .filter(|(id, _)| Some(*id) != excluding)
        .filter(|(_, range)| candidate.overlaps(range))
        .map(|(booking, range)| Conflict {
            booking,
            range: *range,
            shared_days: candidate.shared_days(range),
        })
        .collect()
}
