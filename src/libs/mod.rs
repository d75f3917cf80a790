//! Core library modules for punchclock.
//!
//! ## Engine
//!
//! - **attendance**: the attendance record model and timestamp parsing
//! - **session**: today's session state, reconciled against the server
//! - **calendar**: month grid, per-day index and month loading
//! - **duration**: worked time of a clock-in/clock-out pair
//! - **feed**: flattening records into clock events
//! - **formatter**: date and time display strings
//!
//! ## Infrastructure
//!
//! - **config**, **data_storage**: settings and where they live
//! - **secret**: encrypted storage of the bearer token
//! - **messages**: every user-facing string and the `msg_*!` macros
//! - **view**: terminal tables
//!
//! ## Usage
//!
//! ```rust
//! use punchclock::libs::duration::compute_duration;
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let worked = compute_duration(day.and_hms_opt(9, 0, 0), day.and_hms_opt(17, 30, 0)).unwrap();
//! assert_eq!(worked.to_string(), "8h 30m");
//! ```

pub mod attendance;
pub mod calendar;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod feed;
pub mod formatter;
pub mod messages;
pub mod secret;
pub mod session;
pub mod view;
