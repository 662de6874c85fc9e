//! Tests for inclusive-boundary conflict detection.

use stay_engine::{find_conflicts, normalize, overlaps, BookingId, DateRange};

fn range(start: &str, end: &str) -> DateRange {
    normalize(start, end).unwrap()
}

#[test]
fn one_day_gap_does_not_overlap() {
    let candidate = range("01-10-2023", "01-12-2023");
    assert!(!overlaps(&candidate, &[range("01-13-2023", "01-15-2023")]));
}

#[test]
fn shared_endpoint_overlaps() {
    // Check-in on another stay's check-out day is a conflict.
    let candidate = range("01-10-2023", "01-12-2023");
    assert!(overlaps(&candidate, &[range("01-12-2023", "01-15-2023")]));
    assert!(overlaps(&range("01-12-2023", "01-15-2023"), &[candidate]));
}

#[test]
fn range_overlaps_itself() {
    let a = range("01-20-2023", "01-25-2023");
    assert!(overlaps(&a, &[a]));
    let same_day = range("01-20-2023", "01-20-2023");
    assert!(overlaps(&same_day, &[same_day]));
}

#[test]
fn detects_overlap_spanning_several_bookings() {
    let existing = vec![
        range("01-01-2023", "01-05-2023"),
        range("01-10-2023", "01-15-2023"),
        range("01-20-2023", "01-25-2023"),
    ];
    assert!(overlaps(&range("01-03-2023", "01-12-2023"), &existing));
    assert!(!overlaps(&range("02-01-2023", "02-05-2023"), &existing));
    assert!(overlaps(&range("01-20-2023", "01-25-2023"), &existing));
}

#[test]
fn contained_range_overlaps() {
    let outer = range("03-01-2024", "03-31-2024");
    let inner = range("03-10-2024", "03-11-2024");
    assert!(overlaps(&inner, &[outer]));
    assert!(overlaps(&outer, &[inner]));
}

#[test]
fn empty_existing_never_overlaps() {
    let none: [DateRange; 0] = [];
    assert!(!overlaps(&range("01-01-2023", "01-05-2023"), &none));
}

#[test]
fn find_conflicts_reports_each_hit_with_shared_days() {
    let a = range("01-01-2023", "01-05-2023");
    let b = range("01-10-2023", "01-15-2023");
    let c = range("01-20-2023", "01-25-2023");
    let existing = [(BookingId(1), &a), (BookingId(2), &b), (BookingId(3), &c)];

    let conflicts = find_conflicts(&range("01-04-2023", "01-11-2023"), existing, None);

    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].booking, BookingId(1));
    assert_eq!(conflicts[0].shared_days, 2); // 01-04, 01-05
    assert_eq!(conflicts[1].booking, BookingId(2));
    assert_eq!(conflicts[1].shared_days, 2); // 01-10, 01-11
}

#[test]
fn find_conflicts_skips_excluded_booking() {
    let a = range("01-01-2023", "01-05-2023");
    let b = range("01-06-2023", "01-08-2023");
    let existing = [(BookingId(7), &a), (BookingId(8), &b)];

    // Stretching booking 7 by a day hits booking 8 but not itself.
    let conflicts = find_conflicts(&range("01-01-2023", "01-06-2023"), existing, Some(BookingId(7)));
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].booking, BookingId(8));

    let moved_within_own_dates =
        find_conflicts(&range("01-02-2023", "01-04-2023"), existing, Some(BookingId(7)));
    assert!(moved_within_own_dates.is_empty());
}
