use crate::validate::{parse_date_input, resolve_date_range};

#[test]
fn test_parse_date_input_appends_seconds() {
    assert_eq!(parse_date_input("2024-01-31 23:59").unwrap(), "2024-01-31 23:59:00");
    assert_eq!(parse_date_input("  2024-01-31 00:00 ").unwrap(), "2024-01-31 00:00:00");
}

#[test]
fn test_parse_date_input_rejects_malformed_strings() {
    for input in ["2024-1-31 23:59", "2024-01-31", "31/01/2024 23:59", "2024-01-31T23:59", ""] {
        let err = parse_date_input(input).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD HH:mm"), "{input:?}");
    }
}

#[test]
fn test_parse_date_input_rejects_impossible_dates() {
    // Matches the pattern but is not a real calendar date.
    let err = parse_date_input("2024-02-30 10:00").unwrap_err();
    assert!(err.to_string().contains("Invalid date"));
    let err = parse_date_input("2024-01-01 24:30").unwrap_err();
    assert!(err.to_string().contains("Invalid date"));
}

#[test]
fn test_resolve_date_range_defaults_to_last_24_hours() {
    let (start, end) = resolve_date_range(None, None).unwrap();
    assert!(start.ends_with(":00") && end.ends_with(":00"));
    assert!(start < end);
}

#[test]
fn test_resolve_date_range_keeps_explicit_bounds() {
    let (start, end) = resolve_date_range(Some("2024-01-01 00:00"), Some("2024-01-02 00:00")).unwrap();
    assert_eq!(start, "2024-01-01 00:00:00");
    assert_eq!(end, "2024-01-02 00:00:00");

    assert!(resolve_date_range(Some("not a date"), None).is_err());
}
