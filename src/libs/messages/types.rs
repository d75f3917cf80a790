#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionNotClockedIn,
    SessionClockedIn(String),         // clock-in time
    SessionCompleted(String, String), // clock-in time, clock-out time
    SessionCompletedNoTimes,
    ClockedIn(String),            // time
    ClockedOut(String),           // time
    WorkedToday(String),          // duration
    AlreadyClockedIn(String),     // clock-in time
    AlreadyCompleted,
    NotClockedInYet,
    ClockOutCancelled,
    ConfirmClockOut(String), // clock-in time

    // === CALENDAR MESSAGES ===
    CalendarHeader(String), // "March 2024"
    NoAttendanceForDate(String),
    DayDetailHeader(String), // long date
    InvalidMonthArg(String),
    InvalidDayArg(u32, u32), // day, days in month

    // === LOG FEED MESSAGES ===
    LogFeedHeader,
    LogFeedEmpty,

    // === LEAVE MESSAGES ===
    LeaveRequestsHeader,
    LeaveRequestsEmpty,
    LeaveTypesHeader,
    LeaveRequestSubmitted(i64), // days
    LeaveTypeRequired,
    LeaveTypeUnknown(String),
    LeaveEndBeforeStart,
    LeaveReasonRequired,
    LeaveReasonTooShort(usize), // minimum length
    LeaveReasonTooLong(usize),  // maximum length

    // === AUTHENTICATION MESSAGES ===
    LoggedIn(String), // user name
    LoggedOut,
    SignedUp(String), // user name
    NotLoggedIn,
    LoginFailed,
    RegistrationFailed,
    SignupFieldsRequired,
    SignupInvalidEmail,
    SignupPasswordTooShort(usize),
    SignupPasswordMismatch,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    UsingApiUrl(String),

    // === API MESSAGES ===
    NetworkFailure(String),
    ServerRejected(String),
    UnexpectedResponse(String),
    OperationNotAllowed(String),
    InvalidInput(String),

    // === PROMPTS ===
    PromptEmail,
    PromptPassword,
    PromptConfirmPassword,
    PromptName,
    PromptServerApiUrl,
}
