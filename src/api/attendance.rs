use super::{ApiClient, ApiError, Transport};
use crate::libs::attendance::{timestamp, AttendanceRecord, RecordId};
use chrono::NaiveDateTime;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Body of `GET /attendance/current`. Every field may be absent; no `id`
/// means there is no session today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CurrentSession {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub clock_in: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub clock_out: Option<NaiveDateTime>,
}

/// Body of a successful `POST /clock_in`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockInReceipt {
    #[serde(alias = "id")]
    pub attendance_id: RecordId,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub clock_in: Option<NaiveDateTime>,
}

impl<T: Transport> ApiClient<T> {
    /// Today's session as the server sees it. `Ok(None)` is the explicit
    /// "no record" answer: a `null` body, or a 404 whose JSON object carries
    /// no `id`. A bare or non-JSON 404 means the route itself is missing and
    /// is an error like any other failed status.
    pub async fn current_attendance(&self) -> Result<Option<CurrentSession>, ApiError> {
        let response = self.send(Method::GET, "/attendance/current", None).await?;
        if response.status == StatusCode::NOT_FOUND {
            return match &response.body {
                Value::Object(body) if !has_id(body) => Ok(None),
                body => Err(ApiError::from_status(response.status, body)),
            };
        }
        response.into_json()
    }

    pub async fn clock_in(&self) -> Result<ClockInReceipt, ApiError> {
        self.post_json("/clock_in", json!({})).await
    }

    pub async fn clock_out(&self, attendance_id: &RecordId) -> Result<(), ApiError> {
        self.post_unit(&format!("/clock_out/{}", attendance_id), json!({})).await
    }

    /// Records of one month. `month0` is zero-based; the path carries the
    /// one-based month without padding.
    pub async fn month_attendance(&self, year: i32, month0: u32) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_json(&format!("/attendance/month/{}-{}", year, month0 + 1)).await
    }

    /// The user's full attendance history.
    pub async fn attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_json("/attendance").await
    }
}

fn has_id(body: &Map<String, Value>) -> bool {
    match body.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::String(id)) => !id.trim().is_empty(),
        Some(_) => true,
    }
}
