//! Trainer/plan assignment and direct profile updates
//!
//! Assignment payloads are tri-state per field (absent / null / value),
//! so an admin can clear a trainer without touching the plan and vice
//! versa. Neither id is validated against an actual trainer or plan
//! record here — observed behavior of the system this replaces, kept
//! as-is and documented rather than silently fixed.

use sqlx::SqlitePool;

use crate::db::repository::member_profile;
use shared::models::{AssignmentUpdate, DatesUpdate, MemberProfile, MembershipStatus};

use super::dates::parse_date;
use super::{LifecycleError, LifecycleResult};

/// Resolve the tri-state payload against the stored profile and write
/// both assignment columns back.
pub async fn assign_trainer_and_plan(
    pool: &SqlitePool,
    member_id: i64,
    update: &AssignmentUpdate,
) -> LifecycleResult<MemberProfile> {
    let profile = fetch_profile(pool, member_id).await?;

    let trainer_id = update.trainer().resolve(profile.assigned_trainer_id);
    let plan_id = update.plan().resolve(profile.current_plan_id);

    member_profile::set_assignment(pool, member_id, trainer_id, plan_id).await?;
    tracing::info!(member_id, ?trainer_id, ?plan_id, "Assignment updated");

    fetch_profile(pool, member_id).await
}

/// Direct status set. Independent of the date-derived expiry flag: the
/// stored status may say `Active` while the end date is in the past.
pub async fn update_status(
    pool: &SqlitePool,
    member_id: i64,
    status: MembershipStatus,
) -> LifecycleResult<MemberProfile> {
    // Existence first, so a missing profile is NotFound rather than a
    // zero-row update
    fetch_profile(pool, member_id).await?;
    member_profile::set_status(pool, member_id, status).await?;
    fetch_profile(pool, member_id).await
}

/// Set the membership window. Both dates are required, and the end may
/// not precede the start (strengthened over the observed system, which
/// accepted inverted windows).
pub async fn update_membership_dates(
    pool: &SqlitePool,
    member_id: i64,
    update: &DatesUpdate,
) -> LifecycleResult<MemberProfile> {
    let (start_raw, end_raw) = match (&update.membership_start_date, &update.membership_end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Err(LifecycleError::Validation(
                "Both membership_start_date and membership_end_date are required".into(),
            ))
        }
    };

    let start = parse_date(start_raw)?;
    let end = parse_date(end_raw)?;
    if end < start {
        return Err(LifecycleError::Validation(format!(
            "membership_end_date {end} precedes membership_start_date {start}"
        )));
    }

    fetch_profile(pool, member_id).await?;
    member_profile::set_dates(pool, member_id, start, end).await?;
    fetch_profile(pool, member_id).await
}

pub(super) async fn fetch_profile(
    pool: &SqlitePool,
    member_id: i64,
) -> LifecycleResult<MemberProfile> {
    member_profile::find_by_user_id(pool, member_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Member profile {member_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_member, seed_plan, seed_user, test_pool};
    use chrono::NaiveDate;

    fn assignment(trainer: Option<Option<i64>>, plan: Option<Option<i64>>) -> AssignmentUpdate {
        AssignmentUpdate {
            assigned_trainer_id: trainer,
            current_plan_id: plan,
        }
    }

    fn dates(start: Option<&str>, end: Option<&str>) -> DatesUpdate {
        DatesUpdate {
            membership_start_date: start.map(String::from),
            membership_end_date: end.map(String::from),
        }
    }

    #[tokio::test]
    async fn sets_trainer_and_plan() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        seed_user(&pool, 2, "Coach", "coach@x.com", "trainer").await;
        seed_plan(&pool, 3, "Quarterly", 3, 900.0).await;

        let profile = assign_trainer_and_plan(&pool, 1, &assignment(Some(Some(2)), Some(Some(3))))
            .await
            .unwrap();
        assert_eq!(profile.assigned_trainer_id, Some(2));
        assert_eq!(profile.current_plan_id, Some(3));
    }

    #[tokio::test]
    async fn absent_field_is_left_alone_null_clears() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        assign_trainer_and_plan(&pool, 1, &assignment(Some(Some(2)), Some(Some(3))))
            .await
            .unwrap();

        // Key absent: trainer untouched. Key null: plan cleared.
        let profile = assign_trainer_and_plan(&pool, 1, &assignment(None, Some(None)))
            .await
            .unwrap();
        assert_eq!(profile.assigned_trainer_id, Some(2));
        assert_eq!(profile.current_plan_id, None);
    }

    #[tokio::test]
    async fn dangling_ids_are_accepted_unvalidated() {
        // Observed behavior: no referential check on either id.
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        let profile = assign_trainer_and_plan(
            &pool,
            1,
            &assignment(Some(Some(404)), Some(Some(500))),
        )
        .await
        .unwrap();
        assert_eq!(profile.assigned_trainer_id, Some(404));
        assert_eq!(profile.current_plan_id, Some(500));
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let pool = test_pool().await;
        let err = assign_trainer_and_plan(&pool, 42, &assignment(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));

        let err = update_status(&pool, 42, MembershipStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn status_is_set_directly_and_independently_of_dates() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;

        // Lapsed window...
        update_membership_dates(&pool, 1, &dates(Some("2020-01-01"), Some("2020-02-01")))
            .await
            .unwrap();
        // ...but status may still be flipped to Active: the two are
        // independently settable.
        let profile = update_status(&pool, 1, MembershipStatus::Active)
            .await
            .unwrap();
        assert_eq!(profile.membership_status, MembershipStatus::Active);
        assert_eq!(
            profile.membership_end_date,
            Some(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap())
        );
    }

    #[tokio::test]
    async fn dates_require_both_fields() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;

        let err = update_membership_dates(&pool, 1, &dates(Some("2025-01-01"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));

        let err = update_membership_dates(&pool, 1, &dates(None, Some("2025-01-01")))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn dates_reject_inverted_window() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        let err = update_membership_dates(&pool, 1, &dates(Some("2025-06-01"), Some("2025-05-01")))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn dates_reject_malformed_input() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        let err = update_membership_dates(&pool, 1, &dates(Some("01-06-2025"), Some("2025-07-01")))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn valid_window_is_stored() {
        let pool = test_pool().await;
        seed_member(&pool, 1, "Jane", "jane@x.com").await;
        let profile =
            update_membership_dates(&pool, 1, &dates(Some("2025-01-01"), Some("2025-04-01")))
                .await
                .unwrap();
        assert_eq!(
            profile.membership_start_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(
            profile.membership_end_date,
            Some(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
        );
    }
}
