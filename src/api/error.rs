use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// The transport could not complete the exchange (connection refused, DNS,
/// TLS, timeout reported by the HTTP stack).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Errors surfaced by the attendance engine.
///
/// `Network` and `ServerRejected` are user-visible conditions. `Precondition`
/// means the caller invoked an operation the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("{operation} is not allowed while {state}")]
    Precondition { operation: &'static str, state: String },

    #[error("no stored credential")]
    Unauthenticated,

    #[error("{0}")]
    InvalidInput(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}

impl ApiError {
    /// Maps a non-2xx response to an error. A body carrying `message` (or
    /// `error`) is a server rejection; anything else is reported as a network
    /// failure naming the status.
    pub fn from_status(status: StatusCode, body: &Value) -> Self {
        match server_message(body) {
            Some(message) => ApiError::ServerRejected {
                status: status.as_u16(),
                message,
            },
            None => ApiError::Network(format!("HTTP {}", status)),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
