use super::{ApiClient, ApiError, Transport};
use crate::libs::attendance::{timestamp, RecordId};
use crate::libs::messages::Message;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::debug;

pub const MIN_REASON_LEN: usize = 10;
pub const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveRequest {
    pub id: RecordId,
    pub leave_type: LeaveTypeRef,
    #[serde(deserialize_with = "timestamp::deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "timestamp::deserialize_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<NaiveDateTime>,
}

impl LeaveRequest {
    pub fn days(&self) -> i64 {
        leave_days(self.start_date, self.end_date)
    }
}

/// Inclusive number of calendar days between two dates.
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

/// A leave request as entered, before the type name is resolved to an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl NewLeaveRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let invalid = |message: Message| Err(ApiError::InvalidInput(message.to_string()));
        let reason = self.reason.trim();

        if self.leave_type.trim().is_empty() {
            return invalid(Message::LeaveTypeRequired);
        }
        if self.start_date > self.end_date {
            return invalid(Message::LeaveEndBeforeStart);
        }
        if reason.is_empty() {
            return invalid(Message::LeaveReasonRequired);
        }
        if reason.chars().count() < MIN_REASON_LEN {
            return invalid(Message::LeaveReasonTooShort(MIN_REASON_LEN));
        }
        if reason.chars().count() > MAX_REASON_LEN {
            return invalid(Message::LeaveReasonTooLong(MAX_REASON_LEN));
        }
        Ok(())
    }

    pub fn days(&self) -> i64 {
        leave_days(self.start_date, self.end_date)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn leave_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json("/leave_request").await
    }

    pub async fn leave_types(&self) -> Result<Vec<LeaveType>, ApiError> {
        self.get_json("/leave_type").await
    }

    /// Validates, resolves the type name against `GET /leave_type`, then
    /// posts the request. An unknown type name is rejected before posting.
    pub async fn submit_leave_request(&self, request: &NewLeaveRequest) -> Result<(), ApiError> {
        request.validate()?;

        let wanted = request.leave_type.trim();
        let leave_type = self
            .leave_types()
            .await?
            .into_iter()
            .find(|leave_type| leave_type.name == wanted)
            .ok_or_else(|| ApiError::InvalidInput(Message::LeaveTypeUnknown(wanted.to_string()).to_string()))?;

        debug!(leave_type = %leave_type.id, days = request.days(), "submitting leave request");
        let body = json!({
            "leave_type_id": leave_type.id,
            "start_date": request.start_date.format("%Y-%m-%d").to_string(),
            "end_date": request.end_date.format("%Y-%m-%d").to_string(),
            "reason": request.reason.trim(),
        });
        self.post_unit("/leave_request", body).await
    }
}
