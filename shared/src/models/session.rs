//! Training Session Model

use serde::{Deserialize, Serialize};

/// Session lifecycle state. Only `Scheduled` sessions may be edited;
/// the transition to `Completed` or `Canceled` happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Canceled,
}

/// Session entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Session {
    pub id: i64,
    pub trainer_id: i64,
    pub member_id: i64,
    pub session_date: String,
    pub session_time: String,
    pub duration_minutes: i64,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub completed_at: Option<i64>,
    pub canceled_at: Option<i64>,
    pub created_at: i64,
}

/// Session row with member name joined in (trainer schedule view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SessionWithMember {
    pub id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub session_date: String,
    pub session_time: String,
    pub duration_minutes: i64,
    pub status: SessionStatus,
    pub notes: Option<String>,
}

/// Schedule session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreate {
    pub member_id: i64,
    pub session_date: String,
    pub session_time: String,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Edit session payload (scheduled sessions only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub session_date: String,
    pub session_time: String,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Session status payload — allowed targets: completed, canceled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusUpdate {
    pub status: SessionStatus,
}
