//! Member roster projection
//!
//! The joined listing served to admins: user ⋈ profile ⋈ trainer name ⋈
//! plan name, plus the derived `is_expired` flag. The flag is computed
//! here at read time from the injected "today" — it is never persisted,
//! so it cannot go stale.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::repository::member_profile;
use shared::models::{MemberRecord, MemberSummary};

use super::dates::is_expired;
use super::{LifecycleError, LifecycleResult};

/// Full roster, most recently created member first. Materialized in
/// full — fine at gym scale, revisit before paginating dashboards.
pub async fn list_members(pool: &SqlitePool, today: NaiveDate) -> LifecycleResult<Vec<MemberSummary>> {
    let records = member_profile::list_member_records(pool).await?;
    Ok(records
        .into_iter()
        .map(|r| summarize(r, today))
        .collect())
}

pub async fn get_member(
    pool: &SqlitePool,
    member_id: i64,
    today: NaiveDate,
) -> LifecycleResult<MemberSummary> {
    let record = member_profile::find_member_record(pool, member_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Member {member_id} not found")))?;
    Ok(summarize(record, today))
}

fn summarize(record: MemberRecord, today: NaiveDate) -> MemberSummary {
    let expired = is_expired(record.membership_end_date, today);
    MemberSummary {
        user_id: record.user_id,
        full_name: record.full_name,
        email: record.email,
        phone: record.phone,
        assigned_trainer_id: record.assigned_trainer_id,
        trainer_name: record.trainer_name,
        current_plan_id: record.current_plan_id,
        plan_name: record.plan_name,
        membership_start_date: record.membership_start_date,
        membership_end_date: record.membership_end_date,
        membership_status: record.membership_status,
        health_goals: record.health_goals,
        is_expired: expired,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_member, seed_plan, seed_user, test_pool};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn roster_is_newest_first_with_joined_names() {
        let pool = test_pool().await;
        seed_user(&pool, 5, "Coach", "coach@x.com", "trainer").await;
        seed_plan(&pool, 7, "Quarterly", 3, 900.0).await;
        seed_member(&pool, 1, "Alice", "alice@x.com").await;
        seed_member(&pool, 2, "Bob", "bob@x.com").await;

        sqlx::query(
            "UPDATE member_profiles SET assigned_trainer_id = 5, current_plan_id = 7 WHERE user_id = 1",
        )
        .execute(&pool)
        .await
        .unwrap();

        let roster = list_members(&pool, d(2025, 1, 1)).await.unwrap();
        assert_eq!(roster.len(), 2);
        // Descending by id
        assert_eq!(roster[0].user_id, 2);
        assert_eq!(roster[1].user_id, 1);
        assert_eq!(roster[1].trainer_name.as_deref(), Some("Coach"));
        assert_eq!(roster[1].plan_name.as_deref(), Some("Quarterly"));
        // Bob has neither
        assert_eq!(roster[0].trainer_name, None);
        assert_eq!(roster[0].plan_name, None);
    }

    #[tokio::test]
    async fn undated_membership_is_never_expired() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Alice", "alice@x.com").await;
        let roster = list_members(&pool, d(2099, 1, 1)).await.unwrap();
        assert!(!roster[0].is_expired);
    }

    #[tokio::test]
    async fn expiry_flag_tracks_the_injected_today() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Alice", "alice@x.com").await;
        sqlx::query(
            "UPDATE member_profiles SET membership_end_date = '2025-03-01' WHERE user_id = 1",
        )
        .execute(&pool)
        .await
        .unwrap();

        let before = get_member(&pool, 1, d(2025, 3, 1)).await.unwrap();
        assert!(!before.is_expired);
        let after = get_member(&pool, 1, d(2025, 3, 2)).await.unwrap();
        assert!(after.is_expired);
    }

    #[tokio::test]
    async fn trainers_do_not_appear_in_the_roster() {
        let pool = test_pool().await;
        seed_user(&pool, 5, "Coach", "coach@x.com", "trainer").await;
        seed_member(&pool, 1, "Alice", "alice@x.com").await;
        let roster = list_members(&pool, d(2025, 1, 1)).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user_id, 1);
    }

    #[tokio::test]
    async fn missing_member_is_not_found() {
        let pool = test_pool().await;
        let err = get_member(&pool, 42, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }
}
