//! Strict timestamp parsing for date columns
//!
//! A fixed list of formats is tried in order and the first match wins.
//! Month-only values map to the first day of the month. Nothing is coerced:
//! a value that matches no format is an error for the caller to report.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats carrying a time of day; `%.f` also accepts a missing fraction
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Calendar dates
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Month-only values, completed with day 1
const MONTH_FORMATS: [&str; 6] = ["%Y-%m", "%Y/%m", "%b-%Y", "%b %Y", "%B %Y", "%Y%b"];

/// Why a value was rejected
pub const NO_FORMAT_MATCHED: &str = "no supported date format matched";
pub const EMPTY_VALUE: &str = "empty value";

/// Parse a single cell into a timestamp.
///
/// Timezone-aware RFC 3339 values are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, &'static str> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(EMPTY_VALUE);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    let first_of_month = format!("{}|01", value);
    for format in MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&first_of_month, &format!("{}|%d", format)) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    Err(NO_FORMAT_MATCHED)
}

/// Whether every present cell parses and at least one is present.
pub fn all_parse<'a>(cells: impl IntoIterator<Item = &'a str>) -> bool {
    let mut any = false;
    for cell in cells {
        if parse_timestamp(cell).is_err() {
            return false;
        }
        any = true;
    }
    any
}
