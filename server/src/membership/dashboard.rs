//! Dashboard aggregation
//!
//! Pure read-side counts, recomputed on every request. The four numbers
//! are independent point-in-time reads — a member counted as expired
//! can simultaneously be checked in, and that is fine.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::repository::{attendance, member_profile, user};
use shared::models::{DashboardStats, Role};

use super::LifecycleResult;

pub async fn dashboard_stats(
    pool: &SqlitePool,
    today: NaiveDate,
) -> LifecycleResult<DashboardStats> {
    let total_members = user::count_by_role(pool, Role::Member).await?;
    let active_trainers = user::count_by_role(pool, Role::Trainer).await?;
    let expired_memberships = member_profile::count_expired(pool, today).await?;
    let checked_in_now = attendance::count_checked_in(pool).await?;

    Ok(DashboardStats {
        total_members,
        active_trainers,
        expired_memberships,
        checked_in_now,
    })
}
