//! Null-safe coercion of raw CSV fields into typed values.
//!
//! Every function here is total: whatever the export contains (empty cells,
//! literal "NaN"/"undefined", stray whitespace, garbage text) the result is a
//! typed value or an explicit null-equivalent, never an error.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == "NaN" || raw == "undefined"
}

/// `None` for empty/missing/non-numeric input; fractional values are
/// truncated toward zero ("12.7" parses as 12).
pub fn parse_integer(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if is_missing(raw) {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}

/// `0.0` (not null) for empty/invalid input; valid values are rounded to two
/// decimal places, half away from zero at the cent.
pub fn parse_decimal(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0.0;
    };
    if is_missing(raw) {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => (f * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

/// Parses a calendar date and pins it to midnight UTC. `None` for
/// empty/unparseable input.
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if is_missing(raw) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Time-of-day columns (punch in/out) come in either 24-hour or AM/PM form.
pub fn parse_time(raw: Option<&str>) -> Option<NaiveTime> {
    let raw = raw?.trim();
    if is_missing(raw) {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// `None` for empty/"NaN"/"undefined"; otherwise the trimmed string.
pub fn parse_string(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if is_missing(raw) {
        return None;
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const MISSING: &[Option<&str>] = &[
        None,
        Some(""),
        Some("   "),
        Some("NaN"),
        Some("undefined"),
    ];

    #[test]
    fn missing_inputs_coerce_to_nulls_and_zero() {
        for raw in MISSING {
            assert_eq!(parse_integer(*raw), None, "integer from {raw:?}");
            assert_eq!(parse_decimal(*raw), 0.0, "decimal from {raw:?}");
            assert_eq!(parse_date(*raw), None, "date from {raw:?}");
            assert_eq!(parse_time(*raw), None, "time from {raw:?}");
            assert_eq!(parse_string(*raw), None, "string from {raw:?}");
        }
    }

    #[test]
    fn integers_truncate_toward_zero() {
        assert_eq!(parse_integer(Some("42")), Some(42));
        assert_eq!(parse_integer(Some(" 42 ")), Some(42));
        assert_eq!(parse_integer(Some("12.7")), Some(12));
        assert_eq!(parse_integer(Some("-3.9")), Some(-3));
        assert_eq!(parse_integer(Some("abc")), None);
    }

    #[test]
    fn decimals_round_to_cents() {
        assert_eq!(parse_decimal(Some("8")), 8.0);
        assert_eq!(parse_decimal(Some("12.344")), 12.34);
        assert_eq!(parse_decimal(Some("12.346")), 12.35);
        assert_eq!(parse_decimal(Some("7.125001")), 7.13);
        assert_eq!(parse_decimal(Some("not a number")), 0.0);
    }

    #[test]
    fn dates_normalize_to_midnight_utc() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for raw in ["2024-01-15", "01/15/2024", "01/15/24"] {
            let parsed = parse_date(Some(raw)).unwrap();
            assert_eq!(parsed.date_naive(), expected, "from {raw:?}");
            assert_eq!(parsed.num_seconds_from_midnight(), 0);
        }
        assert_eq!(parse_date(Some("15th of January")), None);
    }

    #[test]
    fn times_accept_both_clock_styles() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        for raw in ["14:30:00", "14:30", "02:30:00 PM", "2:30 PM"] {
            assert_eq!(parse_time(Some(raw)), Some(expected), "from {raw:?}");
        }
        assert_eq!(parse_time(Some("half past two")), None);
    }

    #[test]
    fn strings_are_trimmed() {
        assert_eq!(parse_string(Some("  Kitchen ")), Some("Kitchen".to_string()));
        assert_eq!(parse_string(Some("Front of House")), Some("Front of House".to_string()));
    }
}
