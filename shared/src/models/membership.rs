//! Membership Profile Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serde_helpers::{double_option, FieldUpdate};

/// Stored membership status. Set directly by admins and forced to
/// `Active` on renewal; independent of the date-derived expiry flag
/// (the two may diverge, see `MemberSummary::is_expired`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MembershipStatus {
    Active,
    Inactive,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "Active",
            MembershipStatus::Inactive => "Inactive",
        }
    }
}

/// Membership profile entity — one-to-one with a `member`-role user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberProfile {
    pub user_id: i64,
    pub assigned_trainer_id: Option<i64>,
    pub current_plan_id: Option<i64>,
    pub membership_start_date: Option<NaiveDate>,
    pub membership_end_date: Option<NaiveDate>,
    pub membership_status: MembershipStatus,
    pub health_goals: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Raw roster row (user ⋈ profile ⋈ trainer ⋈ plan), as fetched
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberRecord {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_trainer_id: Option<i64>,
    pub trainer_name: Option<String>,
    pub current_plan_id: Option<i64>,
    pub plan_name: Option<String>,
    pub membership_start_date: Option<NaiveDate>,
    pub membership_end_date: Option<NaiveDate>,
    pub membership_status: MembershipStatus,
    pub health_goals: Option<String>,
    pub created_at: i64,
}

/// Roster entry as served to clients: [`MemberRecord`] plus the derived
/// expiry flag. `is_expired` is a read-time projection, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_trainer_id: Option<i64>,
    pub trainer_name: Option<String>,
    pub current_plan_id: Option<i64>,
    pub plan_name: Option<String>,
    pub membership_start_date: Option<NaiveDate>,
    pub membership_end_date: Option<NaiveDate>,
    pub membership_status: MembershipStatus,
    pub health_goals: Option<String>,
    pub is_expired: bool,
    pub created_at: i64,
}

/// Trainer/plan assignment payload.
///
/// Both fields are tri-state: absent = leave as-is, null = clear,
/// value = set. See [`double_option`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_trainer_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub current_plan_id: Option<Option<i64>>,
}

impl AssignmentUpdate {
    pub fn trainer(&self) -> FieldUpdate<i64> {
        self.assigned_trainer_id.into()
    }

    pub fn plan(&self) -> FieldUpdate<i64> {
        self.current_plan_id.into()
    }
}

/// Membership status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub membership_status: MembershipStatus,
}

/// Membership window payload. Both dates are required; kept `Option`
/// so a missing key surfaces as a validation failure instead of a
/// deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesUpdate {
    pub membership_start_date: Option<String>,
    pub membership_end_date: Option<String>,
}

/// Health goals payload (member profile free text)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthGoalsUpdate {
    pub health_goals: Option<String>,
}

/// Roster row for a trainer's assigned members
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AssignedMember {
    pub user_id: i64,
    pub full_name: String,
    pub membership_status: MembershipStatus,
    pub is_checked_in: bool,
}
