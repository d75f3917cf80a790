//! Attendance record model shared by the session reconciler, the calendar
//! index and the log feed.
//!
//! One record exists per user per calendar date. The server creates it on
//! clock-in, fills `clock_out` on clock-out and computes `status`; the client
//! never recomputes or mutates any of it.

use super::duration::{compute_duration, WorkedDuration};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Opaque server-assigned identifier. The wire form may be a JSON number or
/// a string; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Ok(Self(s)),
            other => Err(de::Error::custom(format!("invalid record id: {}", other))),
        }
    }
}

/// Numeric ids go back out as JSON numbers.
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

/// Server-computed attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Absent,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::OnTime => "on time",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(deserialize_with = "timestamp::deserialize_date")]
    pub attendance_date: NaiveDate,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub clock_in: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub clock_out: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// A completed day has both timestamps set.
    pub fn is_completed(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_some()
    }

    pub fn worked(&self) -> Option<WorkedDuration> {
        compute_duration(self.clock_in, self.clock_out)
    }
}

fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AttendanceStatus, D::Error> {
    Ok(Option::<AttendanceStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parsing of the server's ISO-8601-like timestamps into local wall-clock
/// values.
pub mod timestamp {
    use super::*;

    const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

    /// Accepts `2024-03-05T09:00:00`, `2024-03-05 09:00:00`, optional
    /// fractional seconds, and RFC 3339 with an offset (converted to local
    /// time).
    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
            return Some(with_offset.with_timezone(&Local).naive_local());
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }

    /// Accepts a bare `YYYY-MM-DD` or the date part of a longer timestamp.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
    }

    pub fn deserialize_optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
        }
    }

    pub fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}
