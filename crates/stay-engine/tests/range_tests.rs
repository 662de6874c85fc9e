//! Tests for date parsing, range normalization, night counts, and formatting.

use chrono::{NaiveDate, TimeZone, Utc};
use stay_engine::range::CANONICAL_FORMAT;
use stay_engine::{normalize, parse_date, DateRange, StayError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn parses_month_first_dash_and_slash() {
    assert_eq!(parse_date("12-18-2023").unwrap(), date(2023, 12, 18));
    assert_eq!(parse_date("12/18/2023").unwrap(), date(2023, 12, 18));
}

#[test]
fn parses_iso_date_and_datetimes() {
    assert_eq!(parse_date("2023-01-05").unwrap(), date(2023, 1, 5));
    assert_eq!(parse_date("2023-01-05T14:00:00").unwrap(), date(2023, 1, 5));
    // Date as written, not shifted to UTC.
    assert_eq!(
        parse_date("2023-12-20T23:30:00-03:00").unwrap(),
        date(2023, 12, 20)
    );
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse_date("  01-05-2023 ").unwrap(), date(2023, 1, 5));
}

#[test]
fn garbage_is_an_invalid_range() {
    for raw in ["", "not a date", "13-45-2023", "2023-02-30"] {
        let err = parse_date(raw).unwrap_err();
        assert!(
            matches!(err, StayError::InvalidRange(_)),
            "{:?} should be rejected, got {:?}",
            raw,
            err
        );
    }
}

// ── Normalization ───────────────────────────────────────────────────────────

#[test]
fn normalize_mixed_layouts_compares_by_value() {
    let a = normalize("12/18/2023", "2023-12-23").unwrap();
    let b = normalize("12-18-2023", "12-23-2023").unwrap();
    assert_eq!(a, b);
}

#[test]
fn normalize_accepts_typed_dates() {
    let start = Utc.with_ymd_and_hms(2024, 2, 1, 22, 0, 0).unwrap();
    let range = normalize(start, date(2024, 2, 5)).unwrap();
    assert_eq!(range.start(), date(2024, 2, 1));
    assert_eq!(range.end(), date(2024, 2, 5));
}

#[test]
fn normalize_rejects_inverted_range() {
    let err = normalize("01-05-2023", "01-01-2023").unwrap_err();
    assert!(matches!(err, StayError::InvalidRange(_)));
}

#[test]
fn normalize_rejects_unparsable_endpoint() {
    assert!(matches!(
        normalize("01-05-2023", "soon").unwrap_err(),
        StayError::InvalidRange(_)
    ));
}

#[test]
fn new_enforces_ordering() {
    assert!(DateRange::new(date(2023, 1, 2), date(2023, 1, 1)).is_err());
    assert!(DateRange::new(date(2023, 1, 1), date(2023, 1, 1)).is_ok());
}

// ── Nights ──────────────────────────────────────────────────────────────────

#[test]
fn nights_counts_whole_days() {
    assert_eq!(normalize("01-01-2023", "01-05-2023").unwrap().nights(), 4);
    assert_eq!(normalize("2023-03-15", "2023-03-20").unwrap().nights(), 5);
}

#[test]
fn same_day_range_has_zero_nights_and_one_day() {
    let range = DateRange::single_day(date(2023, 6, 5));
    assert_eq!(range.nights(), 0);
    assert_eq!(range.days(), 1);
}

#[test]
fn nights_span_month_and_leap_day() {
    assert_eq!(normalize("02-27-2024", "03-02-2024").unwrap().nights(), 4);
    assert_eq!(normalize("12-30-2023", "01-02-2024").unwrap().nights(), 3);
}

// ── Membership and overlap on a single range ────────────────────────────────

#[test]
fn contains_is_inclusive() {
    let range = normalize("01-10-2023", "01-12-2023").unwrap();
    assert!(range.contains(date(2023, 1, 10)));
    assert!(range.contains(date(2023, 1, 12)));
    assert!(!range.contains(date(2023, 1, 13)));
}

#[test]
fn shared_days_counts_inclusive_intersection() {
    let a = normalize("01-10-2023", "01-12-2023").unwrap();
    let b = normalize("01-12-2023", "01-15-2023").unwrap();
    let c = normalize("01-13-2023", "01-15-2023").unwrap();
    assert_eq!(a.shared_days(&b), 1);
    assert_eq!(a.shared_days(&c), 0);
    assert_eq!(a.shared_days(&a), 3);
}

#[test]
fn iter_days_yields_every_day() {
    let range = normalize("01-30-2023", "02-02-2023").unwrap();
    let days: Vec<NaiveDate> = range.iter_days().collect();
    assert_eq!(
        days,
        vec![
            date(2023, 1, 30),
            date(2023, 1, 31),
            date(2023, 2, 1),
            date(2023, 2, 2)
        ]
    );
}

// ── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn format_canonical_matches_picker_layout() {
    let range = normalize("2023-01-01", "2023-01-05").unwrap();
    let (start, end) = range.format(CANONICAL_FORMAT).unwrap();
    assert_eq!(start, "01-01-2023");
    assert_eq!(end, "01-05-2023");
}

#[test]
fn format_arbitrary_pattern() {
    let range = normalize("12-18-2023", "12-23-2023").unwrap();
    let (start, end) = range.format("%m/%d/%Y").unwrap();
    assert_eq!(start, "12/18/2023");
    assert_eq!(end, "12/23/2023");
}

#[test]
fn format_rejects_broken_pattern() {
    let range = normalize("12-18-2023", "12-23-2023").unwrap();
    assert!(matches!(
        range.format("%Y-%").unwrap_err(),
        StayError::InvalidPattern(_)
    ));
}

#[test]
fn format_rejects_time_and_offset_fields() {
    // Well-formed patterns asking for fields a calendar date lacks.
    let range = normalize("12-18-2023", "12-23-2023").unwrap();
    for pattern in ["%H:%M", "%z", "%m-%d-%Y %H:%M:%S"] {
        let err = range.format(pattern).unwrap_err();
        assert!(
            matches!(err, StayError::InvalidPattern(ref p) if p == pattern),
            "{:?} should be rejected, got {:?}",
            pattern,
            err
        );
    }
}

#[test]
fn display_uses_canonical_form() {
    let range = normalize("2023-12-18", "2023-12-23").unwrap();
    assert_eq!(range.to_string(), "[12-18-2023, 12-23-2023]");
}

// ── Serde ───────────────────────────────────────────────────────────────────

#[test]
fn deserialize_rejects_inverted_range() {
    let ok: DateRange =
        serde_json::from_str(r#"{"start":"2023-12-18","end":"2023-12-23"}"#).unwrap();
    assert_eq!(ok.nights(), 5);

    let bad = serde_json::from_str::<DateRange>(r#"{"start":"2023-12-23","end":"2023-12-18"}"#);
    assert!(bad.is_err());
}
