//! Today's clock-in/clock-out session, reconciled against the server.
//!
//! The server is authoritative. [`SessionReconciler`] keeps the last known
//! [`SessionState`] for the current calendar day and moves it forward only:
//!
//! ```text
//! NotClockedIn ──clock_in──▶ ClockedIn ──clock_out──▶ Completed
//! ```
//!
//! Every refresh and every mutation takes a ticket from one sequence. A
//! refresh result is applied only if nothing newer has been applied since it
//! was issued. Mutations reserve the reconciler before their first await
//! point, so two overlapping `clock_in` calls cannot both pass the
//! precondition check.
//!
//! The lock is never held across an await.

use super::attendance::RecordId;
use super::duration::{compute_duration, WorkedDuration};
use crate::api::{ApiClient, ApiError, CurrentSession, Transport};
use chrono::{Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NotClockedIn,
    ClockedIn {
        attendance_id: RecordId,
        clock_in_at: NaiveDateTime,
    },
    Completed {
        clock_in_at: Option<NaiveDateTime>,
        clock_out_at: NaiveDateTime,
    },
}

impl SessionState {
    /// Maps the server's view of today. No record, or a record without an
    /// id or timestamps, is `NotClockedIn`; a clock-out makes it
    /// `Completed` whatever else is set.
    pub fn from_current(current: Option<CurrentSession>) -> Self {
        let Some(CurrentSession {
            id: Some(attendance_id),
            clock_in,
            clock_out,
        }) = current
        else {
            return SessionState::NotClockedIn;
        };

        match (clock_in, clock_out) {
            (clock_in_at, Some(clock_out_at)) => SessionState::Completed {
                clock_in_at,
                clock_out_at,
            },
            (Some(clock_in_at), None) => SessionState::ClockedIn {
                attendance_id,
                clock_in_at,
            },
            (None, None) => SessionState::NotClockedIn,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SessionState::NotClockedIn => 0,
            SessionState::ClockedIn { .. } => 1,
            SessionState::Completed { .. } => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::NotClockedIn => "not clocked in",
            SessionState::ClockedIn { .. } => "clocked in",
            SessionState::Completed { .. } => "completed",
        }
    }

    /// Worked time of a completed day with both timestamps known.
    pub fn worked(&self) -> Option<WorkedDuration> {
        match self {
            SessionState::Completed {
                clock_in_at,
                clock_out_at,
            } => compute_duration(*clock_in_at, Some(*clock_out_at)),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier and time of a successful clock-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockInOutcome {
    pub attendance_id: RecordId,
    pub clock_in_at: NaiveDateTime,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    day: NaiveDate,
    in_flight: Option<&'static str>,
    issued: u64,
    applied: u64,
}

impl Inner {
    /// A state from a previous day says nothing about today.
    fn roll_to(&mut self, today: NaiveDate) {
        if self.day != today {
            debug!(from = %self.day, to = %today, "session day changed");
            self.day = today;
            self.state = SessionState::NotClockedIn;
        }
    }

    fn next_ticket(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }
}

/// Marks a mutation as in flight. Cleared by [`Reservation::complete`] or on
/// drop when the mutation fails.
struct Reservation<'a> {
    inner: &'a Mutex<Inner>,
    ticket: u64,
    done: bool,
}

impl Reservation<'_> {
    fn complete(mut self, state: SessionState) {
        let mut inner = self.inner.lock();
        inner.state = state;
        inner.applied = inner.applied.max(self.ticket);
        inner.in_flight = None;
        self.done = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.inner.lock().in_flight = None;
        }
    }
}

pub struct SessionReconciler<T> {
    client: ApiClient<T>,
    inner: Mutex<Inner>,
    today: fn() -> NaiveDate,
    now: fn() -> NaiveDateTime,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<T: Transport> SessionReconciler<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner {
                state: SessionState::NotClockedIn,
                day: local_today(),
                in_flight: None,
                issued: 0,
                applied: 0,
            }),
            today: local_today,
            now: local_now,
        }
    }

    /// Replaces the wall clock, for tests and for replaying a fixed day.
    pub fn with_clock(mut self, today: fn() -> NaiveDate, now: fn() -> NaiveDateTime) -> Self {
        self.today = today;
        self.now = now;
        self.inner.get_mut().day = today();
        self
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Last known state for today.
    pub fn state(&self) -> SessionState {
        let mut inner = self.inner.lock();
        inner.roll_to((self.today)());
        inner.state.clone()
    }

    /// Queries the server and reconciles. On failure the in-memory state is
    /// untouched and the error is returned; a response that was overtaken by
    /// a newer one is dropped and the current state returned.
    pub async fn refresh(&self) -> Result<SessionState, ApiError> {
        let ticket = self.inner.lock().next_ticket();
        let current = self.client.current_attendance().await?;
        let fetched = SessionState::from_current(current);

        let mut inner = self.inner.lock();
        if inner.applied > ticket {
            warn!(ticket, applied = inner.applied, "discarding stale session refresh");
            return Ok(inner.state.clone());
        }

        let today = (self.today)();
        if inner.day != today {
            inner.day = today;
        } else if fetched.rank() < inner.state.rank() {
            warn!(
                current = inner.state.label(),
                fetched = fetched.label(),
                "ignoring session regression within the same day"
            );
            inner.applied = ticket;
            return Ok(inner.state.clone());
        }

        debug!(state = fetched.label(), ticket, "session refreshed");
        inner.state = fetched;
        inner.applied = ticket;
        Ok(inner.state.clone())
    }

    /// Clocks in. Valid only while `NotClockedIn` and no other mutation is
    /// in flight.
    pub async fn clock_in(&self) -> Result<ClockInOutcome, ApiError> {
        let reservation = self.reserve("clock_in", |state| matches!(state, SessionState::NotClockedIn))?;

        let receipt = self.client.clock_in().await?;
        let outcome = ClockInOutcome {
            attendance_id: receipt.attendance_id,
            clock_in_at: receipt.clock_in.unwrap_or_else(self.now),
        };
        debug!(attendance_id = %outcome.attendance_id, "clocked in");
        reservation.complete(SessionState::ClockedIn {
            attendance_id: outcome.attendance_id.clone(),
            clock_in_at: outcome.clock_in_at,
        });
        Ok(outcome)
    }

    /// Clocks out of the session `attendance_id`. Valid only while
    /// `ClockedIn` for that id. Confirmation is the caller's job.
    pub async fn clock_out(&self, attendance_id: &RecordId) -> Result<(), ApiError> {
        let mut clock_in_at = None;
        let reservation = self.reserve("clock_out", |state| match state {
            SessionState::ClockedIn {
                attendance_id: current,
                clock_in_at: at,
            } if current == attendance_id => {
                clock_in_at = Some(*at);
                true
            }
            _ => false,
        })?;

        self.client.clock_out(attendance_id).await?;
        debug!(%attendance_id, "clocked out");
        reservation.complete(SessionState::Completed {
            clock_in_at,
            clock_out_at: (self.now)(),
        });
        Ok(())
    }

    fn reserve(
        &self,
        operation: &'static str,
        allowed: impl FnOnce(&SessionState) -> bool,
    ) -> Result<Reservation<'_>, ApiError> {
        let mut inner = self.inner.lock();
        inner.roll_to((self.today)());

        let violation = if let Some(other) = inner.in_flight {
            Some(format!("{} is in progress", other))
        } else if !allowed(&inner.state) {
            Some(inner.state.label().to_string())
        } else {
            None
        };
        if let Some(state) = violation {
            error!(operation, %state, "session precondition violated");
            return Err(ApiError::Precondition { operation, state });
        }

        inner.in_flight = Some(operation);
        let ticket = inner.next_ticket();
        Ok(Reservation {
            inner: &self.inner,
            ticket,
            done: false,
        })
    }
}
