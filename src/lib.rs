//! # punchclock
//!
//! A personal time-attendance client: clock in and out of the working day,
//! browse a monthly attendance calendar, follow a feed of clock events and
//! submit leave requests against a remote record-keeping service.
//!
//! ## Layout
//!
//! - [`api`]: typed client for the service behind a substitutable transport
//! - [`libs`]: session reconciliation, calendar index, durations, feed,
//!   formatting, plus configuration, storage and messages
//! - [`commands`]: the `punchclock` command-line interface
//!
//! ## Debug output
//!
//! Set `PUNCHCLOCK_DEBUG=1` (or any `RUST_LOG`) to route all output through
//! `tracing`, including request and state-transition diagnostics.

pub mod api;
pub mod commands;
pub mod libs;
