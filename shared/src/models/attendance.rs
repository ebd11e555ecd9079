//! Attendance Model

use serde::{Deserialize, Serialize};

/// Attendance entity. Open while `check_out_at` is null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceRecord {
    pub id: i64,
    pub member_id: i64,
    pub trainer_id: Option<i64>,
    pub check_in_at: i64,
    pub check_out_at: Option<i64>,
    pub notes: Option<String>,
}

/// Attendance history row for a member (trainer name joined in)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceHistoryRow {
    pub id: i64,
    pub trainer_id: Option<i64>,
    pub trainer_name: Option<String>,
    pub check_in_at: i64,
    pub check_out_at: Option<i64>,
    pub notes: Option<String>,
}

/// Trainer check-in payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInPayload {
    pub member_id: i64,
}

/// Trainer check-out payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutPayload {
    pub member_id: i64,
    pub notes: Option<String>,
}
