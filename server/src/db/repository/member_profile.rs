//! Membership Profile Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{AssignedMember, MemberProfile, MemberRecord, MembershipStatus};
use sqlx::{SqliteConnection, SqlitePool};

const PROFILE_SELECT: &str = "SELECT user_id, assigned_trainer_id, current_plan_id, membership_start_date, membership_end_date, membership_status, health_goals, created_at, updated_at FROM member_profiles";

/// Roster join: member user ⋈ profile ⋈ assigned trainer ⋈ plan.
/// LEFT JOINs keep members with no trainer/plan in the result.
const MEMBER_RECORD_SELECT: &str = "SELECT u.id AS user_id, u.full_name, u.email, u.phone, mp.assigned_trainer_id, t.full_name AS trainer_name, mp.current_plan_id, p.name AS plan_name, mp.membership_start_date, mp.membership_end_date, mp.membership_status, mp.health_goals, u.created_at FROM users u JOIN member_profiles mp ON u.id = mp.user_id LEFT JOIN users t ON mp.assigned_trainer_id = t.id LEFT JOIN plans p ON mp.current_plan_id = p.id";

pub async fn find_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<MemberProfile>> {
    let sql = format!("{} WHERE user_id = ?", PROFILE_SELECT);
    let row = sqlx::query_as::<_, MemberProfile>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert an empty profile (no plan, no trainer, no dates) on an open
/// connection/transaction. Used when a member is provisioned.
pub(crate) async fn insert_empty(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO member_profiles (user_id, membership_status, created_at, updated_at) VALUES (?1, 'Inactive', ?2, ?2)",
    )
    .bind(user_id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Overwrite both assignment columns with already-resolved values.
/// The tri-state (keep / clear / set) is resolved by the caller.
pub async fn set_assignment(
    pool: &SqlitePool,
    user_id: i64,
    trainer_id: Option<i64>,
    plan_id: Option<i64>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_profiles SET assigned_trainer_id = ?1, current_plan_id = ?2, updated_at = ?3 WHERE user_id = ?4",
    )
    .bind(trainer_id)
    .bind(plan_id)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Member profile {user_id} not found"
        )));
    }
    Ok(())
}

pub async fn set_status(
    pool: &SqlitePool,
    user_id: i64,
    status: MembershipStatus,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_profiles SET membership_status = ?1, updated_at = ?2 WHERE user_id = ?3",
    )
    .bind(status)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Member profile {user_id} not found"
        )));
    }
    Ok(())
}

pub async fn set_dates(
    pool: &SqlitePool,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_profiles SET membership_start_date = ?1, membership_end_date = ?2, updated_at = ?3 WHERE user_id = ?4",
    )
    .bind(start)
    .bind(end)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Member profile {user_id} not found"
        )));
    }
    Ok(())
}

/// Renewal write: new paid-through date + forced `Active` status.
/// The start date deliberately stays untouched — it records original
/// enrollment, not the current paid window.
pub async fn apply_renewal(pool: &SqlitePool, user_id: i64, new_end: NaiveDate) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_profiles SET membership_status = 'Active', membership_end_date = ?1, updated_at = ?2 WHERE user_id = ?3",
    )
    .bind(new_end)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Member profile {user_id} not found"
        )));
    }
    Ok(())
}

pub async fn set_health_goals(
    pool: &SqlitePool,
    user_id: i64,
    health_goals: Option<&str>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_profiles SET health_goals = ?1, updated_at = ?2 WHERE user_id = ?3",
    )
    .bind(health_goals)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Member profile {user_id} not found"
        )));
    }
    Ok(())
}

/// Full roster, newest member first. Materialized in one query —
/// acceptable at gym scale, no pagination.
pub async fn list_member_records(pool: &SqlitePool) -> RepoResult<Vec<MemberRecord>> {
    let sql = format!("{} ORDER BY u.id DESC", MEMBER_RECORD_SELECT);
    let rows = sqlx::query_as::<_, MemberRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_member_record(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Option<MemberRecord>> {
    let sql = format!("{} WHERE u.id = ?", MEMBER_RECORD_SELECT);
    let row = sqlx::query_as::<_, MemberRecord>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Members assigned to a trainer, with an open-attendance flag
pub async fn list_by_trainer(
    pool: &SqlitePool,
    trainer_id: i64,
) -> RepoResult<Vec<AssignedMember>> {
    let rows = sqlx::query_as::<_, AssignedMember>(
        "SELECT u.id AS user_id, u.full_name, mp.membership_status, EXISTS (SELECT 1 FROM attendance a WHERE a.member_id = u.id AND a.trainer_id = ?1 AND a.check_out_at IS NULL) AS is_checked_in FROM member_profiles mp JOIN users u ON u.id = mp.user_id WHERE mp.assigned_trainer_id = ?1 ORDER BY u.id DESC",
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn is_assigned_to_trainer(
    pool: &SqlitePool,
    member_id: i64,
    trainer_id: i64,
) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS (SELECT 1 FROM member_profiles WHERE user_id = ? AND assigned_trainer_id = ?)",
    )
    .bind(member_id)
    .bind(trainer_id)
    .fetch_one(pool)
    .await?;
    Ok(exists != 0)
}

/// Assigned to the trainer AND stored status `Active` (session
/// scheduling precondition; note this reads the stored status, not the
/// date-derived expiry)
pub async fn is_active_member_of_trainer(
    pool: &SqlitePool,
    member_id: i64,
    trainer_id: i64,
) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS (SELECT 1 FROM member_profiles WHERE user_id = ? AND assigned_trainer_id = ? AND membership_status = 'Active')",
    )
    .bind(member_id)
    .bind(trainer_id)
    .fetch_one(pool)
    .await?;
    Ok(exists != 0)
}

pub async fn count_by_trainer(pool: &SqlitePool, trainer_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM member_profiles WHERE assigned_trainer_id = ?",
    )
    .bind(trainer_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Memberships whose end date is strictly before `today` — the same
/// predicate as the roster's `is_expired` flag, applied in aggregate.
pub async fn count_expired(pool: &SqlitePool, today: NaiveDate) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM member_profiles WHERE membership_end_date IS NOT NULL AND membership_end_date < ?",
    )
    .bind(today)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn count_referencing_plan(pool: &SqlitePool, plan_id: i64) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member_profiles WHERE current_plan_id = ?")
            .bind(plan_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
