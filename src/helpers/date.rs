//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date layouts accepted in the note index, tried in order
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Parse a note date such as `2024-01-15`, `2024-01-15 10:30:00` or RFC 3339
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a date string using a Moment.js-compatible format string
///
/// Unparseable input is returned as-is.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", "YYYY/MM/DD") // -> "2024/01/15"
/// ```
pub fn format_date(date: &str, format: &str) -> String {
    match parse_date(date) {
        Some(parsed) => parsed
            .format(&moment_to_chrono_format(format))
            .to_string(),
        None => date.to_string(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each category
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
