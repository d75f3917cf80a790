use chrono::NaiveDateTime;
use std::fmt;

/// Worked time of a completed day, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct WorkedDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl WorkedDuration {
    pub fn from_minutes(total: i64) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for WorkedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Elapsed time between clock-in and clock-out.
///
/// `None` when either side is missing or clock-out precedes clock-in.
/// Partial minutes are dropped, never rounded.
pub fn compute_duration(clock_in: Option<NaiveDateTime>, clock_out: Option<NaiveDateTime>) -> Option<WorkedDuration> {
    let (clock_in, clock_out) = (clock_in?, clock_out?);
    if clock_out < clock_in {
        return None;
    }
    Some(WorkedDuration::from_minutes((clock_out - clock_in).num_minutes()))
}
