//! Training Session Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{
    Session, SessionCreate, SessionStatus, SessionUpdate, SessionWithMember, TrainerStats,
};
use sqlx::SqlitePool;

const SESSION_SELECT: &str = "SELECT id, trainer_id, member_id, session_date, session_time, duration_minutes, status, notes, completed_at, canceled_at, created_at FROM sessions";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Session>> {
    let sql = format!("{} WHERE id = ?", SESSION_SELECT);
    let row = sqlx::query_as::<_, Session>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, trainer_id: i64, data: SessionCreate) -> RepoResult<Session> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO sessions (id, trainer_id, member_id, session_date, session_time, duration_minutes, status, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'scheduled', ?7, ?8)",
    )
    .bind(id)
    .bind(trainer_id)
    .bind(data.member_id)
    .bind(&data.session_date)
    .bind(&data.session_time)
    .bind(data.duration_minutes.unwrap_or(60))
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create session".into()))
}

/// Trainer's schedule, earliest first
pub async fn list_for_trainer(
    pool: &SqlitePool,
    trainer_id: i64,
) -> RepoResult<Vec<SessionWithMember>> {
    let rows = sqlx::query_as::<_, SessionWithMember>(
        "SELECT s.id, s.member_id, u.full_name AS member_name, s.session_date, s.session_time, s.duration_minutes, s.status, s.notes FROM sessions s JOIN users u ON u.id = s.member_id WHERE s.trainer_id = ? ORDER BY s.session_date ASC, s.session_time ASC",
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Edit a scheduled session. Completed or canceled sessions are frozen.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    trainer_id: i64,
    data: SessionUpdate,
) -> RepoResult<Session> {
    let session = find_by_id(pool, id)
        .await?
        .filter(|s| s.trainer_id == trainer_id)
        .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))?;

    if session.status != SessionStatus::Scheduled {
        return Err(RepoError::Validation(
            "Cannot edit a session that is completed or canceled".into(),
        ));
    }

    sqlx::query(
        "UPDATE sessions SET session_date = ?1, session_time = ?2, duration_minutes = ?3, notes = ?4 WHERE id = ?5",
    )
    .bind(&data.session_date)
    .bind(&data.session_time)
    .bind(data.duration_minutes.unwrap_or(60))
    .bind(&data.notes)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))
}

/// One-way transition scheduled → completed | canceled, stamping the
/// matching timestamp. A session is finalized exactly once.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    trainer_id: i64,
    status: SessionStatus,
) -> RepoResult<Session> {
    if status == SessionStatus::Scheduled {
        return Err(RepoError::Validation(
            "Invalid status. Allowed: completed, canceled".into(),
        ));
    }

    let session = find_by_id(pool, id)
        .await?
        .filter(|s| s.trainer_id == trainer_id)
        .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))?;

    if session.status != SessionStatus::Scheduled {
        return Err(RepoError::Validation(format!(
            "Session already {}. Status cannot be changed",
            match session.status {
                SessionStatus::Completed => "completed",
                SessionStatus::Canceled => "canceled",
                SessionStatus::Scheduled => "scheduled",
            }
        )));
    }

    let now = shared::util::now_millis();
    let sql = match status {
        SessionStatus::Completed => {
            "UPDATE sessions SET status = 'completed', completed_at = ?1 WHERE id = ?2"
        }
        _ => "UPDATE sessions SET status = 'canceled', canceled_at = ?1 WHERE id = ?2",
    };
    sqlx::query(sql).bind(now).bind(id).execute(pool).await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))
}

/// Per-trainer dashboard counts. `today` comes from the injected clock.
pub async fn stats_for_trainer(
    pool: &SqlitePool,
    trainer_id: i64,
    member_count: i64,
    today: NaiveDate,
) -> RepoResult<TrainerStats> {
    let (total, scheduled, completed, canceled): (i64, i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(status = 'scheduled'), 0), COALESCE(SUM(status = 'completed'), 0), COALESCE(SUM(status = 'canceled'), 0) FROM sessions WHERE trainer_id = ?",
    )
    .bind(trainer_id)
    .fetch_one(pool)
    .await?;

    let today_sessions = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sessions WHERE trainer_id = ? AND session_date = ?",
    )
    .bind(trainer_id)
    .bind(today.format("%Y-%m-%d").to_string())
    .fetch_one(pool)
    .await?;

    Ok(TrainerStats {
        total_members: member_count,
        total_sessions: total,
        scheduled_sessions: scheduled,
        completed_sessions: completed,
        canceled_sessions: canceled,
        today_sessions,
    })
}
