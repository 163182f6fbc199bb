//! Time parsing for agenda display strings.
//!
//! Session times reach the packer as display strings ("3:00 PM"), not
//! timestamps. They are converted to minutes since midnight for sorting and
//! clustering. Parsing never fails: malformed components turn into NaN and
//! the NaN propagates into the result.

use std::cmp::Ordering;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Parse `"H:MM"` or `"H:MM AM/PM"` into minutes since midnight.
///
/// - Empty input is `0.0` (unknown start, sorts first).
/// - `"PM"` adds 12 hours unless the hour is 12; `"AM"` maps hour 12 to 0.
/// - Without a period marker the hour is taken as 24-hour.
/// - Hours and minutes are not range-checked.
pub fn parse_time(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut parts = text.split(' ');
    let clock = parts.next().unwrap_or_default();
    let period = parts.next();

    let mut components = clock.split(':');
    let mut hours = numeric_component(components.next().unwrap_or_default());
    let minutes = components.next().map_or(f64::NAN, numeric_component);

    match period {
        Some("PM") if hours != 12.0 => hours += 12.0,
        Some("AM") if hours == 12.0 => hours = 0.0,
        _ => {}
    }

    hours * MINUTES_PER_HOUR + minutes
}

/// Ascending start-time order.
///
/// Total over NaN: NaN keys compare equal to each other and after every
/// number, so the sort stays deterministic for malformed times.
pub fn compare_start(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Format minutes since midnight back to `"H:MM AM/PM"`.
///
/// Returns `None` for NaN, infinite or negative input.
pub fn format_clock(minutes: f64) -> Option<String> {
    if !minutes.is_finite() || minutes < 0.0 {
        return None;
    }

    let total = minutes.floor() as u64;
    let hours = (total / 60) % 24;
    let mins = total % 60;
    let (display_hour, period) = match hours {
        0 => (12, "AM"),
        1..=11 => (hours, "AM"),
        12 => (12, "PM"),
        _ => (hours - 12, "PM"),
    };

    Some(format!("{}:{:02} {}", display_hour, mins, period))
}

/// Permissive numeric cast for one clock component. Whitespace is trimmed
/// and an empty component reads as zero. Only plain decimal literals
/// (digits, sign, point, exponent) are accepted; hex, `Infinity` and
/// anything else are NaN.
fn numeric_component(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let is_decimal_literal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_morning_and_afternoon() {
        assert_eq!(parse_time("9:00 AM"), 540.0);
        assert_eq!(parse_time("10:30 AM"), 630.0);
        assert_eq!(parse_time("3:00 PM"), 900.0);
        assert_eq!(parse_time("1:15 PM"), 795.0);
    }

    #[test]
    fn test_parse_noon_and_midnight() {
        assert_eq!(parse_time("12:00 PM"), 720.0);
        assert_eq!(parse_time("12:30 AM"), 30.0);
        assert_eq!(parse_time("12:00 AM"), 0.0);
    }

    #[test]
    fn test_parse_without_period_is_24_hour() {
        assert_eq!(parse_time("14:45"), 885.0);
        assert_eq!(parse_time("0:05"), 5.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(parse_time(""), 0.0);
    }

    #[test]
    fn test_period_marker_is_case_sensitive() {
        // Lowercase markers are not recognised; the hour is used as-is.
        assert_eq!(parse_time("3:00 pm"), 180.0);
    }

    #[test]
    fn test_out_of_range_values_are_not_validated() {
        assert_eq!(parse_time("25:00"), 1500.0);
        assert_eq!(parse_time("9:75 AM"), 615.0);
    }

    #[test]
    fn test_malformed_components_propagate_nan() {
        assert!(parse_time("nine:00 AM").is_nan());
        assert!(parse_time("9:xx AM").is_nan());
        assert!(parse_time("9 AM").is_nan());
        assert!(parse_time(" ").is_nan());
        assert!(parse_time("0x10:00").is_nan());
        assert!(parse_time("Infinity:00").is_nan());
    }

    #[test]
    fn test_compare_start_orders_nan_last() {
        assert_eq!(compare_start(0.0, 540.0), Ordering::Less);
        assert_eq!(compare_start(540.0, 540.0), Ordering::Equal);
        assert_eq!(compare_start(f64::NAN, 540.0), Ordering::Greater);
        assert_eq!(compare_start(540.0, f64::NAN), Ordering::Less);
        assert_eq!(compare_start(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0).as_deref(), Some("12:00 AM"));
        assert_eq!(format_clock(540.0).as_deref(), Some("9:00 AM"));
        assert_eq!(format_clock(720.0).as_deref(), Some("12:00 PM"));
        assert_eq!(format_clock(795.0).as_deref(), Some("1:15 PM"));
        assert_eq!(format_clock(f64::NAN), None);
    }
}
