//! Disabled-date derivation for calendar pickers.
//!
//! Booked intervals are sorted and merged into disjoint spans, so a lookup is a
//! binary search and long stays never materialize one entry per day. A date is
//! blocked when it is strictly before "today" or falls inside any span.

use chrono::{Days, NaiveDate};

use crate::range::DateRange;

/// A disabled-date predicate for one property, frozen at derivation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDates {
    today: NaiveDate,
    /// Sorted by start, pairwise disjoint and non-adjacent.
    spans: Vec<DateRange>,
}

/// Merge booked intervals into sorted, disjoint spans.
///
/// Adjacent intervals (one ends the day before the next starts) are merged too,
/// since day-level membership cannot tell them apart.
fn merge_spans<'a>(intervals: impl IntoIterator<Item = &'a DateRange>) -> Vec<DateRange> {
    let mut sorted: Vec<DateRange> = intervals.into_iter().copied().collect();
    sorted.sort();

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            let touches = match last.end().checked_add_days(Days::new(1)) {
                Some(next_day) => range.start() <= next_day,
                None => true,
            };
            if touches {
                last.extend_end(range.end());
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

/// Build the blocked-date predicate for a property's booked intervals.
///
/// An empty interval list still blocks every day before `today`.
pub fn derive<'a>(intervals: impl IntoIterator<Item = &'a DateRange>, today: NaiveDate) -> BlockedDates {
    BlockedDates {
        today,
        spans: merge_spans(intervals),
    }
}

/// Like [`derive`], but propagates "nothing known yet".
///
/// `None` means the property's intervals are not loaded; callers must not read
/// that as "nothing is blocked".
pub fn derive_known(intervals: Option<&[DateRange]>, today: NaiveDate) -> Option<BlockedDates> {
    intervals.map(|list| derive(list, today))
}

impl BlockedDates {
    /// The reference day; everything strictly before it is blocked.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Merged booked spans, sorted by start.
    pub fn spans(&self) -> &[DateRange] {
        &self.spans
    }

    /// True if `date` is in the past or inside a booked span.
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        date < self.today || self.is_booked(date)
    }

    /// True if `date` is inside a booked span, ignoring the past-date rule.
    pub fn is_booked(&self, date: NaiveDate) -> bool {
        let idx = self.spans.partition_point(|span| span.end() < date);
        self.spans.get(idx).is_some_and(|span| span.contains(date))
    }

    /// Borrow as a plain `date -> disabled` closure for calendar widgets.
    pub fn as_predicate(&self) -> impl Fn(NaiveDate) -> bool + '_ {
        move |date| self.is_blocked(date)
    }

    /// Every blocked day inside `window`, in order.
    pub fn blocked_days(&self, window: &DateRange) -> Vec<NaiveDate> {
        window.iter_days().filter(|d| self.is_blocked(*d)).collect()
    }

    /// Maximal runs of bookable days inside `window`, sorted by start.
    pub fn free_ranges(&self, window: &DateRange) -> Vec<DateRange> {
        let mut free = Vec::new();
        let mut cursor = Some(window.start().max(self.today));

        for span in &self.spans {
            let Some(from) = cursor else { break };
            if span.end() < from {
                continue;
            }
            if span.start() > window.end() {
                break;
            }
            if from < span.start() {
                if let Some(until) = span.start().pred_opt() {
                    if let Ok(gap) = DateRange::new(from, until) {
                        free.push(gap);
                    }
                }
            }
            cursor = span.end().succ_opt();
        }

        // Trailing run after the last span.
        if let Some(from) = cursor {
            if let Ok(tail) = DateRange::new(from, window.end()) {
                free.push(tail);
            }
        }

        free
    }

    /// The earliest stay of `nights` nights that fits entirely inside `window`.
    ///
    /// A stay of `n` nights occupies `n + 1` calendar days, check-in and
    /// check-out included.
    pub fn first_available(&self, window: &DateRange, nights: u32) -> Option<DateRange> {
        self.free_ranges(window)
            .into_iter()
            .find(|run| run.nights() >= nights)
            .and_then(|run| {
                let end = run.start().checked_add_days(Days::new(u64::from(nights)))?;
                DateRange::new(run.start(), end).ok()
            })
    }
}
