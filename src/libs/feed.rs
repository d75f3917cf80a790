//! Flattening of attendance records into a feed of clock events.

use super::attendance::AttendanceRecord;
use super::formatter::{format_date, format_time};
use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    ClockIn,
    ClockOut,
}

impl LogKind {
    fn suffix(&self) -> &'static str {
        match self {
            LogKind::ClockIn => "clockIn",
            LogKind::ClockOut => "clockOut",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogKind::ClockIn => "Clock in",
            LogKind::ClockOut => "Clock out",
        })
    }
}

/// One clock event, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// `{record id}-clockIn` or `{record id}-clockOut`, unique per feed.
    pub id: String,
    pub kind: LogKind,
    pub at: NaiveDateTime,
    pub date: String,
    pub time: String,
}

impl LogEntry {
    fn new(record: &AttendanceRecord, kind: LogKind, at: NaiveDateTime) -> Self {
        Self {
            id: format!("{}-{}", record.id, kind.suffix()),
            kind,
            at,
            date: format_date(&at.date()),
            time: format_time(&at),
        }
    }
}

/// Emits the clock-out event then the clock-in event of each record, in
/// input order. Missing timestamps produce no entry.
pub fn build_feed(records: &[AttendanceRecord]) -> Vec<LogEntry> {
    records
        .iter()
        .flat_map(|record| {
            let clock_out = record.clock_out.map(|at| LogEntry::new(record, LogKind::ClockOut, at));
            let clock_in = record.clock_in.map(|at| LogEntry::new(record, LogKind::ClockIn, at));
            clock_out.into_iter().chain(clock_in)
        })
        .collect()
}

/// Orders records newest day first so that [`build_feed`] yields a
/// most-recent-first feed.
pub fn most_recent_first(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records.sort_by_key(|record| Reverse((record.attendance_date, record.clock_in)));
    records
}
