//! Typed client for the attendance record-keeping service.
//!
//! Every network call goes through one seam, the [`Transport`] trait. The
//! production implementation is [`HttpTransport`] (reqwest); tests substitute
//! a scripted fake. On top of it sits [`ApiClient`], which attaches the bearer
//! credential from an explicit [`AuthContext`] and decodes responses.
//!
//! ## Endpoint groups
//!
//! - **attendance**: current session, clock-in/out, month and full history
//! - **auth**: login and signup, plus the on-disk [`AuthStore`]
//! - **leave**: leave request listing and submission
//!
//! ## Usage
//!
//! ```rust,no_run
//! use punchclock::api::{ApiClient, AuthContext, HttpTransport};
//!
//! # async fn run() -> Result<(), punchclock::api::ApiError> {
//! let auth = AuthContext::new("token");
//! let client = ApiClient::new(HttpTransport::new("http://127.0.0.1:8000/api"), auth);
//! let records = client.month_attendance(2024, 2).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::{Method, StatusCode};
use serde_json::Value;

pub mod attendance;
pub mod auth;
pub mod client;
pub mod error;
pub mod leave;

pub use attendance::{ClockInReceipt, CurrentSession};
pub use auth::{AuthContext, AuthStore, SignupForm, User};
pub use client::{ApiClient, HttpTransport};
pub use error::{ApiError, TransportError};
pub use leave::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};

/// One outgoing request. `path` is relative to the API base URL and starts
/// with `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// A completed exchange: HTTP status plus the parsed JSON body (`Null` when
/// the body was empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Request/response capability used by every endpoint.
///
/// Implementations report only transport-level failures as errors; any HTTP
/// status, including 4xx and 5xx, is a successful exchange.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
