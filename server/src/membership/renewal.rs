//! Plan renewal
//!
//! Extends a member's paid-through date by one duration of their
//! current plan. The anchor for the new window depends on whether the
//! membership is still valid on the day of renewal:
//!
//! - lapsed or never dated: the new period starts today
//! - still valid: the new period starts the day after the current end
//!   date, contiguously — no gap, no overlap
//!
//! Only the end date and the status move; the start date keeps
//! recording original enrollment.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::repository::{member_profile, plan};

use super::assignment::fetch_profile;
use super::dates::add_months;
use super::{LifecycleError, LifecycleResult};

pub async fn renew(
    pool: &SqlitePool,
    member_id: i64,
    today: NaiveDate,
) -> LifecycleResult<NaiveDate> {
    let profile = fetch_profile(pool, member_id).await?;

    let plan_id = profile
        .current_plan_id
        .ok_or(LifecycleError::NoActivePlan)?;

    let plan = plan::find_by_id(pool, plan_id).await?.ok_or_else(|| {
        LifecycleError::Configuration(format!(
            "Assigned plan {plan_id} could not be retrieved for member {member_id}"
        ))
    })?;

    let anchor = match profile.membership_end_date {
        // Still valid (end date today or later): extend contiguously
        Some(end) if end >= today => end.succ_opt().unwrap_or(end),
        // Lapsed or never dated: the renewal starts today
        _ => today,
    };

    let new_end = add_months(anchor, plan.duration_months.max(0) as u32);
    member_profile::apply_renewal(pool, member_id, new_end).await?;

    tracing::info!(member_id, plan_id, %new_end, "Membership renewed");
    Ok(new_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_member, seed_plan, test_pool};
    use shared::models::MembershipStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn set_window(pool: &SqlitePool, member_id: i64, start: &str, end: &str) {
        sqlx::query(
            "UPDATE member_profiles SET membership_start_date = ?1, membership_end_date = ?2 WHERE user_id = ?3",
        )
        .bind(start)
        .bind(end)
        .bind(member_id)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn assign_plan(pool: &SqlitePool, member_id: i64, plan_id: i64) {
        sqlx::query("UPDATE member_profiles SET current_plan_id = ?1 WHERE user_id = ?2")
            .bind(plan_id)
            .bind(member_id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn valid_membership_extends_contiguously() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Monthly", 1, 300.0).await;
        assign_plan(&pool, 1, 10).await;
        set_window(&pool, 1, "2024-12-10", "2025-01-10").await;

        // Any "today" before the end date yields the same result
        for today in [d(2024, 12, 15), d(2025, 1, 1), d(2025, 1, 10)] {
            let new_end = renew(&pool, 1, today).await.unwrap();
            assert_eq!(new_end, d(2025, 2, 10));
            set_window(&pool, 1, "2024-12-10", "2025-01-10").await;
        }
    }

    #[tokio::test]
    async fn lapsed_membership_anchors_at_today() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Quarterly", 3, 900.0).await;
        assign_plan(&pool, 1, 10).await;
        set_window(&pool, 1, "2023-10-01", "2024-01-01").await;

        let new_end = renew(&pool, 1, d(2025, 6, 1)).await.unwrap();
        assert_eq!(new_end, d(2025, 9, 1));
    }

    #[tokio::test]
    async fn undated_membership_anchors_at_today() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Monthly", 1, 300.0).await;
        assign_plan(&pool, 1, 10).await;

        let new_end = renew(&pool, 1, d(2025, 1, 31)).await.unwrap();
        assert_eq!(new_end, d(2025, 2, 28));
    }

    #[tokio::test]
    async fn renewal_forces_active_and_keeps_start_date() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Monthly", 1, 300.0).await;
        assign_plan(&pool, 1, 10).await;
        set_window(&pool, 1, "2024-06-01", "2025-01-10").await;

        renew(&pool, 1, d(2025, 1, 5)).await.unwrap();

        let profile = crate::db::repository::member_profile::find_by_user_id(&pool, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.membership_status, MembershipStatus::Active);
        assert_eq!(profile.membership_start_date, Some(d(2024, 6, 1)));
        assert_eq!(profile.membership_end_date, Some(d(2025, 2, 10)));
    }

    #[tokio::test]
    async fn end_date_today_still_counts_as_valid() {
        // today == end date is not lapsed (expiry is strict), so the
        // anchor is end + 1 day.
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Monthly", 1, 300.0).await;
        assign_plan(&pool, 1, 10).await;
        set_window(&pool, 1, "2024-12-01", "2025-01-10").await;

        let new_end = renew(&pool, 1, d(2025, 1, 10)).await.unwrap();
        assert_eq!(new_end, d(2025, 2, 11));
    }

    #[tokio::test]
    async fn no_plan_is_rejected() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        let err = renew(&pool, 1, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NoActivePlan));
    }

    #[tokio::test]
    async fn dangling_plan_is_a_configuration_error() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        assign_plan(&pool, 1, 777).await; // no such plan

        let err = renew(&pool, 1, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, LifecycleError::Configuration(_)));
    }

    #[tokio::test]
    async fn missing_member_is_not_found() {
        let pool = test_pool().await;
        let err = renew(&pool, 42, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn month_end_clamp_applies_to_renewal() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_plan(&pool, 10, "Monthly", 1, 300.0).await;
        assign_plan(&pool, 1, 10).await;
        // Valid through Jan 30 → anchor Jan 31 → clamped to Feb 29 (leap)
        set_window(&pool, 1, "2024-01-01", "2024-01-30").await;

        let new_end = renew(&pool, 1, d(2024, 1, 15)).await.unwrap();
        assert_eq!(new_end, d(2024, 2, 29));
    }
}
