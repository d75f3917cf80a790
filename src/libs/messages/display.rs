//! Display implementation for punchclock messages.
//!
//! All user-facing text is defined here, in one place, so that commands only
//! ever refer to `Message` variants and never to literal strings.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionNotClockedIn => "You have not clocked in today".to_string(),
            Message::SessionClockedIn(time) => format!("Clocked in since {}", time),
            Message::SessionCompleted(clock_in, clock_out) => {
                format!("Workday completed: {} - {}", clock_in, clock_out)
            }
            Message::SessionCompletedNoTimes => "Workday completed".to_string(),
            Message::ClockedIn(time) => format!("Clocked in at {}", time),
            Message::ClockedOut(time) => format!("Clocked out at {}", time),
            Message::WorkedToday(duration) => format!("Worked today: {}", duration),
            Message::AlreadyClockedIn(time) => format!("Already clocked in since {}", time),
            Message::AlreadyCompleted => "Today's workday is already completed".to_string(),
            Message::NotClockedInYet => "You need to clock in first".to_string(),
            Message::ClockOutCancelled => "Clock-out cancelled".to_string(),
            Message::ConfirmClockOut(time) => {
                format!("You clocked in at {}. Clock out now?", time)
            }

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(title) => format!("📅 {}", title),
            Message::NoAttendanceForDate(date) => format!("No attendance record for {}", date),
            Message::DayDetailHeader(date) => date.clone(),
            Message::InvalidMonthArg(value) => {
                format!("Invalid month '{}', expected YYYY-MM", value)
            }
            Message::InvalidDayArg(day, days) => {
                format!("Invalid day {}, the month has {} days", day, days)
            }

            // === LOG FEED MESSAGES ===
            Message::LogFeedHeader => "Time log".to_string(),
            Message::LogFeedEmpty => "No clock-in or clock-out events yet".to_string(),

            // === LEAVE MESSAGES ===
            Message::LeaveRequestsHeader => "Leave requests".to_string(),
            Message::LeaveRequestsEmpty => "No leave requests yet".to_string(),
            Message::LeaveTypesHeader => "Leave types".to_string(),
            Message::LeaveRequestSubmitted(days) => {
                format!("Your leave request for {} day(s) has been submitted", days)
            }
            Message::LeaveTypeRequired => "Please select a leave type".to_string(),
            Message::LeaveTypeUnknown(name) => format!("Unknown leave type '{}'", name),
            Message::LeaveEndBeforeStart => "End date cannot be before start date".to_string(),
            Message::LeaveReasonRequired => "Please provide a reason for your leave".to_string(),
            Message::LeaveReasonTooShort(min) => format!(
                "Please provide a more detailed reason (minimum {} characters)",
                min
            ),
            Message::LeaveReasonTooLong(max) => {
                format!("The reason is too long (maximum {} characters)", max)
            }

            // === AUTHENTICATION MESSAGES ===
            Message::LoggedIn(name) => format!("Welcome back, {}", name),
            Message::LoggedOut => "Logged out".to_string(),
            Message::SignedUp(name) => format!("Account created, welcome {}", name),
            Message::NotLoggedIn => "You are not logged in, run `punchclock login` first".to_string(),
            Message::LoginFailed => "Login failed".to_string(),
            Message::RegistrationFailed => "Registration failed".to_string(),
            Message::SignupFieldsRequired => "Please fill in all fields".to_string(),
            Message::SignupInvalidEmail => "Please enter a valid email address".to_string(),
            Message::SignupPasswordTooShort(min) => {
                format!("Password must be at least {} characters long", min)
            }
            Message::SignupPasswordMismatch => "Passwords do not match".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::UsingApiUrl(url) => format!("Using API at {}", url),

            // === API MESSAGES ===
            Message::NetworkFailure(detail) => {
                format!("Network error, please try again later ({})", detail)
            }
            Message::ServerRejected(message) => message.clone(),
            Message::UnexpectedResponse(detail) => {
                format!("Unexpected response from server: {}", detail)
            }
            Message::OperationNotAllowed(detail) => format!("Operation not allowed: {}", detail),
            Message::InvalidInput(detail) => detail.clone(),

            // === PROMPTS ===
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptConfirmPassword => "Confirm password".to_string(),
            Message::PromptName => "Full name".to_string(),
            Message::PromptServerApiUrl => "Enter the attendance API URL".to_string(),
        };
        write!(f, "{}", text)
    }
}
