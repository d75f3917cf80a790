//! Monthly attendance calendar.
//!
//! - [`MonthCursor`]: a validated (year, zero-based month) with rollover
//!   navigation and the Sunday-first day grid.
//! - [`CalendarIndex`]: one month of records keyed by `YYYY-MM-DD`.
//! - [`MonthlyCalendar`]: loads months through the API and keeps the most
//!   recent applicable index. Late responses for a month the user already
//!   navigated away from, or for a request that a newer one overtook, are
//!   dropped.
//!
//! ```rust
//! use punchclock::libs::calendar::MonthCursor;
//!
//! let feb = MonthCursor::new(2024, 1).unwrap();
//! assert_eq!(feb.days_in_month(), 29);
//! assert_eq!(feb.shift(-2).unwrap(), MonthCursor::new(2023, 11).unwrap());
//! ```

use super::attendance::{AttendanceRecord, AttendanceStatus};
use super::duration::WorkedDuration;
use super::formatter::{date_key, date_key_of, format_date, format_optional_time};
use crate::api::{ApiClient, ApiError, Transport};
use chrono::{Datelike, NaiveDate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Gregorian rule: every fourth year, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month0: u32,
}

impl MonthCursor {
    /// Fails for a month index above 11 or a year outside the calendar
    /// range `chrono` can represent.
    pub fn new(year: i32, month0: u32) -> Result<Self, ApiError> {
        if month0 > 11 {
            return Err(ApiError::InvalidInput(format!("month index {} is out of range 0-11", month0)));
        }
        if NaiveDate::from_ymd_opt(year, month0 + 1, 1).is_none() {
            return Err(ApiError::InvalidInput(format!("year {} is out of range", year)));
        }
        Ok(Self { year, month0 })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// Moves by `delta` months, rolling over year boundaries.
    pub fn shift(&self, delta: i32) -> Result<Self, ApiError> {
        let out_of_range = || ApiError::InvalidInput(format!("{} shifted by {} months is out of range", self, delta));
        let total = i64::from(self.year) * 12 + i64::from(self.month0) + i64::from(delta);
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| out_of_range())?;
        Self::new(year, total.rem_euclid(12) as u32).map_err(|_| out_of_range())
    }

    pub fn next(&self) -> Result<Self, ApiError> {
        self.shift(1)
    }

    pub fn prev(&self) -> Result<Self, ApiError> {
        self.shift(-1)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    /// Weekday of the 1st, Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .map(|first| first.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Calendar cells: one blank per weekday before the 1st, then every day
    /// of the month.
    pub fn grid(&self) -> Vec<Option<u32>> {
        let blanks = std::iter::repeat(None).take(self.first_weekday() as usize);
        blanks.chain((1..=self.days_in_month()).map(Some)).collect()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// `"March 2024"`.
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize], self.year)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}

/// Parses `YYYY-MM` with a one-based month.
impl FromStr for MonthCursor {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::InvalidInput(format!("invalid month '{}', expected YYYY-MM", value));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        MonthCursor::new(year, month - 1)
    }
}

/// Sunday-first grid of a month, see [`MonthCursor::grid`].
pub fn month_grid(year: i32, month0: u32) -> Result<Vec<Option<u32>>, ApiError> {
    Ok(MonthCursor::new(year, month0)?.grid())
}

/// Result of looking a day up. `NotFound` is a normal answer: no attendance
/// was recorded for that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLookup<'a> {
    Found(&'a AttendanceRecord),
    NotFound,
}

impl<'a> DayLookup<'a> {
    pub fn record(&self) -> Option<&'a AttendanceRecord> {
        match self {
            DayLookup::Found(record) => Some(record),
            DayLookup::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarIndex {
    month: MonthCursor,
    records: HashMap<String, AttendanceRecord>,
}

impl CalendarIndex {
    /// Indexes `records` by date. Records outside `month` are skipped; if two
    /// records share a date the first one is kept.
    pub fn build(month: MonthCursor, records: Vec<AttendanceRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for record in records {
            if !month.contains(&record.attendance_date) {
                warn!(date = %record.attendance_date, %month, "skipping record outside the requested month");
                continue;
            }
            let key = date_key_of(&record.attendance_date);
            if index.contains_key(&key) {
                warn!(%key, id = %record.id, "duplicate attendance record for date, keeping the first");
                continue;
            }
            index.insert(key, record);
        }
        Self { month, records: index }
    }

    pub fn empty(month: MonthCursor) -> Self {
        Self {
            month,
            records: HashMap::new(),
        }
    }

    pub fn month(&self) -> MonthCursor {
        self.month
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn resolve(&self, year: i32, month0: u32, day: u32) -> DayLookup<'_> {
        match self.records.get(&date_key(year, month0, day)) {
            Some(record) => DayLookup::Found(record),
            None => DayLookup::NotFound,
        }
    }

    /// Looks a day up in the index's own month.
    pub fn resolve_day(&self, day: u32) -> DayLookup<'_> {
        self.resolve(self.month.year, self.month.month0, day)
    }

    /// Days of the month that have a record, ascending.
    pub fn days_with_records(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.records.values().map(|record| record.attendance_date.day()).collect();
        days.sort_unstable();
        days
    }
}

/// Displayable resolution of a found day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetail {
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: AttendanceStatus,
    pub worked: Option<WorkedDuration>,
}

impl From<&AttendanceRecord> for DayDetail {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            date: format_date(&record.attendance_date),
            check_in: format_optional_time(record.clock_in.as_ref()),
            check_out: format_optional_time(record.clock_out.as_ref()),
            status: record.status,
            worked: record.worked(),
        }
    }
}

/// Outcome of a month load that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthLoad {
    Loaded(CalendarIndex),
    /// A newer load, or navigation to another month, happened while this
    /// one was in flight. Nothing was applied.
    Superseded,
}

#[derive(Debug)]
struct CalendarState {
    cursor: MonthCursor,
    index: Option<CalendarIndex>,
    issued: u64,
    applied: u64,
}

pub struct MonthlyCalendar<T> {
    client: ApiClient<T>,
    state: Mutex<CalendarState>,
}

impl<T: Transport> MonthlyCalendar<T> {
    pub fn new(client: ApiClient<T>, cursor: MonthCursor) -> Self {
        Self {
            client,
            state: Mutex::new(CalendarState {
                cursor,
                index: None,
                issued: 0,
                applied: 0,
            }),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.state.lock().cursor
    }

    /// The most recently applied index, if any load succeeded yet.
    pub fn index(&self) -> Option<CalendarIndex> {
        self.state.lock().index.clone()
    }

    /// Moves the cursor to the month and fetches it. On failure the
    /// previously applied index stays in place.
    pub async fn load_month(&self, year: i32, month0: u32) -> Result<MonthLoad, ApiError> {
        let month = MonthCursor::new(year, month0)?;
        let ticket = {
            let mut state = self.state.lock();
            state.cursor = month;
            state.issued += 1;
            state.issued
        };
        debug!(%month, ticket, "loading month");

        let records = match self.client.month_attendance(year, month0).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%month, error = %err, "month load failed, keeping the previous index");
                return Err(err);
            }
        };

        let mut state = self.state.lock();
        if ticket <= state.applied || state.cursor != month {
            debug!(%month, ticket, applied = state.applied, "discarding superseded month load");
            return Ok(MonthLoad::Superseded);
        }
        let index = CalendarIndex::build(month, records);
        state.index = Some(index.clone());
        state.applied = ticket;
        Ok(MonthLoad::Loaded(index))
    }

    /// Moves `delta` months from the current cursor and loads that month.
    pub async fn navigate(&self, delta: i32) -> Result<MonthLoad, ApiError> {
        let target = self.cursor().shift(delta)?;
        self.load_month(target.year, target.month0).await
    }

    /// Fetches the current month again.
    pub async fn refresh(&self) -> Result<MonthLoad, ApiError> {
        let current = self.cursor();
        self.load_month(current.year, current.month0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn test_month_cursor_parse() {
        assert_eq!("2024-03".parse::<MonthCursor>().unwrap(), MonthCursor::new(2024, 2).unwrap());
        assert_eq!("2024-3".parse::<MonthCursor>().unwrap().to_string(), "2024-03");
        assert!("2024-13".parse::<MonthCursor>().is_err());
        assert!("2024-00".parse::<MonthCursor>().is_err());
        assert!("March".parse::<MonthCursor>().is_err());
    }

    #[test]
    fn test_new_rejects_month_twelve() {
        assert!(matches!(MonthCursor::new(2024, 12), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_shift_past_the_last_month_fails() {
        let last = MonthCursor::containing(NaiveDate::MAX);
        assert!(matches!(last.next(), Err(ApiError::InvalidInput(_))));
        assert!(last.prev().is_ok());
        assert!(MonthCursor::new(2024, 0).unwrap().shift(i32::MAX).is_err());
        assert!(MonthCursor::new(2024, 0).unwrap().shift(i32::MIN).is_err());
    }
}
