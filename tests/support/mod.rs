#![allow(dead_code)]

use parking_lot::Mutex;
use punchclock::api::{ApiClient, ApiRequest, ApiResponse, AuthContext, Transport, TransportError};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::oneshot;

pub const TOKEN: &str = "test-token";

type Outcome = Result<ApiResponse, TransportError>;

enum Reply {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
struct FakeState {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    last: HashMap<(Method, String), Outcome>,
    requests: Vec<ApiRequest>,
}

/// Scripted transport. Replies are queued per method and path and consumed
/// in order; once a route's queue is empty its last ready reply is repeated.
/// Gated replies wait until the test sends the outcome.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.state
            .lock()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Reply::Ready(Ok(response(status, body))));
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Reply::Ready(Err(TransportError(message.to_string()))));
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn gate(&self, method: Method, path: &str) -> oneshot::Sender<Outcome> {
        let (sender, receiver) = oneshot::channel();
        self.push(method, path, Reply::Gated(receiver));
        sender
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.path).collect()
    }

    /// Yields until `count` requests have been sent.
    pub async fn wait_for_requests(&self, count: usize) {
        while self.state.lock().requests.len() < count {
            tokio::task::yield_now().await;
        }
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = {
            let mut state = self.state.lock();
            let key = (request.method.clone(), request.path.clone());
            state.requests.push(request);
            let next = state.replies.get_mut(&key).and_then(VecDeque::pop_front);
            match next {
                Some(Reply::Ready(outcome)) => {
                    state.last.insert(key, outcome.clone());
                    Some(Reply::Ready(outcome))
                }
                Some(gated) => Some(gated),
                None => state.last.get(&key).cloned().map(Reply::Ready),
            }
        };

        match reply {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Gated(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(TransportError("gate dropped".to_string()))),
            None => Ok(response(500, json!({ "message": "no scripted reply" }))),
        }
    }
}

pub fn response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(StatusCode::from_u16(status).unwrap(), body)
}

pub fn client(transport: &FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::new(transport.clone(), AuthContext::new(TOKEN))
}

pub fn record(id: i64, date: &str, clock_in: Option<&str>, clock_out: Option<&str>, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "attendance_date": date,
        "clock_in": clock_in,
        "clock_out": clock_out,
        "status": status,
    })
}
