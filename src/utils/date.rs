//! Date formatting helpers.
//!
//! A few providers hand back machine dates (RFC 3339, epoch seconds) that
//! the display shell shows verbatim, so those adapters reformat them to the
//! short `M/D/YYYY` style the rest of the UI uses.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Reformat an RFC 3339 timestamp as `M/D/YYYY`.
///
/// Unparseable input is passed through unchanged rather than replaced with
/// a sentinel, so the shell still has something to show.
pub fn short_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => format_short(dt.date_naive()),
        Err(_) => raw.to_string(),
    }
}

/// Format Unix epoch seconds as `M/D/YYYY`, or empty when out of range.
pub fn short_date_from_unix(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => format_short(dt.date_naive()),
        _ => String::new(),
    }
}

fn format_short(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
