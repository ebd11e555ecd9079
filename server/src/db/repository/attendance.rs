//! Attendance Repository

use super::{RepoError, RepoResult};
use shared::models::{AttendanceHistoryRow, AttendanceRecord};
use sqlx::SqlitePool;

const ATTENDANCE_SELECT: &str =
    "SELECT id, member_id, trainer_id, check_in_at, check_out_at, notes FROM attendance";

/// Open record for a member/trainer pair, if any
pub async fn find_open(
    pool: &SqlitePool,
    member_id: i64,
    trainer_id: i64,
) -> RepoResult<Option<AttendanceRecord>> {
    let sql = format!(
        "{} WHERE member_id = ? AND trainer_id = ? AND check_out_at IS NULL",
        ATTENDANCE_SELECT
    );
    let row = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(member_id)
        .bind(trainer_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Open a new attendance record. A member can hold at most one open
/// record per trainer at a time.
pub async fn check_in(
    pool: &SqlitePool,
    member_id: i64,
    trainer_id: i64,
) -> RepoResult<AttendanceRecord> {
    if find_open(pool, member_id, trainer_id).await?.is_some() {
        return Err(RepoError::Duplicate("Member already checked in".into()));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO attendance (id, member_id, trainer_id, check_in_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id)
    .bind(member_id)
    .bind(trainer_id)
    .bind(now)
    .execute(pool)
    .await?;

    let sql = format!("{} WHERE id = ?", ATTENDANCE_SELECT);
    sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to record attendance".into()))
}

/// Close the open record for a member/trainer pair
pub async fn check_out(
    pool: &SqlitePool,
    member_id: i64,
    trainer_id: i64,
    notes: Option<&str>,
) -> RepoResult<AttendanceRecord> {
    let open = find_open(pool, member_id, trainer_id)
        .await?
        .ok_or_else(|| RepoError::NotFound("No active check-in found".into()))?;

    let now = shared::util::now_millis();
    sqlx::query("UPDATE attendance SET check_out_at = ?1, notes = ?2 WHERE id = ?3")
        .bind(now)
        .bind(notes)
        .bind(open.id)
        .execute(pool)
        .await?;

    let sql = format!("{} WHERE id = ?", ATTENDANCE_SELECT);
    sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(open.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to close attendance record".into()))
}

/// Member's attendance history, most recent first
pub async fn history_for_member(
    pool: &SqlitePool,
    member_id: i64,
) -> RepoResult<Vec<AttendanceHistoryRow>> {
    let rows = sqlx::query_as::<_, AttendanceHistoryRow>(
        "SELECT a.id, a.trainer_id, t.full_name AS trainer_name, a.check_in_at, a.check_out_at, a.notes FROM attendance a LEFT JOIN users t ON a.trainer_id = t.id WHERE a.member_id = ? ORDER BY a.check_in_at DESC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Currently-open records across the whole gym
pub async fn count_checked_in(pool: &SqlitePool) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE check_out_at IS NULL")
            .fetch_one(pool)
            .await?;
    Ok(count)
}
