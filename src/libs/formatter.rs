//! Display formatting for dates and times.
//!
//! Pure functions, no state. Everything the CLI prints about a point in time
//! goes through here so the calendar, the dashboard and the log feed agree.
//!
//! | function            | example                   |
//! |---------------------|---------------------------|
//! | [`format_time`]     | `09:05 AM`                |
//! | [`format_date`]     | `Tuesday, March 5, 2024`  |
//! | [`format_short_date`] | `03/05/2024`            |
//! | [`date_key`]        | `2024-03-05`              |
//!
//! ```rust
//! use chrono::NaiveDate;
//! use punchclock::libs::formatter::{date_key, format_time};
//!
//! let at = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 30, 0).unwrap();
//! assert_eq!(format_time(&at), "05:30 PM");
//! assert_eq!(date_key(2024, 2, 5), "2024-03-05");
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Placeholder for a time that is not recorded.
pub const MISSING_TIME: &str = "--:--";

/// 12-hour clock, zero-padded, with AM/PM.
pub fn format_time(at: &NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

pub fn format_optional_time(at: Option<&NaiveDateTime>) -> String {
    at.map(format_time).unwrap_or_else(|| MISSING_TIME.to_string())
}

/// Long form: weekday, month name, day, year.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_short_date(date: &NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Index key for a calendar day. `month0` is zero-based.
pub fn date_key(year: i32, month0: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month0 + 1, day)
}

pub fn date_key_of(date: &NaiveDate) -> String {
    date_key(date.year(), date.month0(), date.day())
}
