//! Membership Request Model

use serde::{Deserialize, Serialize};

/// Request lifecycle state. Transitions exactly once from `Pending`
/// to `Approved` or `Rejected`; terminal thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Approved,
    Rejected,
}

/// Membership request entity — a public, pre-member application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipRequest {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: i64,
    pub decided_at: Option<i64>,
}

/// Public submission payload.
///
/// No duplicate-email check is performed: any number of pending
/// requests per email is allowed by design.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct MembershipRequestCreate {
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Decision payload for `POST /api/requests/{id}/decision`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPayload {
    pub decision: RequestDecision,
}
