//! Dashboard Statistics Models

use serde::{Deserialize, Serialize};

/// Admin dashboard counts. Four independent point-in-time reads with
/// no cross-consistency guarantee between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub active_trainers: i64,
    pub expired_memberships: i64,
    pub checked_in_now: i64,
}

/// Per-trainer dashboard counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerStats {
    pub total_members: i64,
    pub total_sessions: i64,
    pub scheduled_sessions: i64,
    pub completed_sessions: i64,
    pub canceled_sessions: i64,
    pub today_sessions: i64,
}
