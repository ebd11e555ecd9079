//! Membership Request Repository

use super::{member_profile, user, RepoError, RepoResult};
use shared::models::{MembershipRequest, MembershipRequestCreate, Role};
use sqlx::SqlitePool;

const REQUEST_SELECT: &str = "SELECT id, full_name, email, phone, message, status, created_at, decided_at FROM membership_requests";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MembershipRequest>> {
    let sql = format!("{} ORDER BY id DESC", REQUEST_SELECT);
    let rows = sqlx::query_as::<_, MembershipRequest>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MembershipRequest>> {
    let sql = format!("{} WHERE id = ?", REQUEST_SELECT);
    let row = sqlx::query_as::<_, MembershipRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    data: &MembershipRequestCreate,
) -> RepoResult<MembershipRequest> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO membership_requests (id, full_name, email, phone, message, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6)",
    )
    .bind(id)
    .bind(&data.full_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.message)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create membership request".into()))
}

/// Conditional terminal transition to `rejected`.
/// Returns false when the request was not pending anymore (or gone) —
/// the caller distinguishes those two cases.
pub async fn mark_rejected(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE membership_requests SET status = 'rejected', decided_at = ?1 WHERE id = ?2 AND status = 'pending'",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Approve a pending request and provision the member, atomically.
///
/// One transaction covers all three writes: the conditional status
/// flip (`WHERE status = 'pending'` doubles as the idempotency guard
/// under concurrent decisions), the new `member`-role user, and the
/// empty membership profile. Either everything commits or nothing does;
/// a request marked approved without a member behind it cannot occur.
///
/// Returns the provisioned user id, or `None` when the request lost
/// the pending-state race.
pub async fn approve_and_provision(
    pool: &SqlitePool,
    request: &MembershipRequest,
    credential_ref: &str,
) -> RepoResult<Option<i64>> {
    let now = shared::util::now_millis();
    let user_id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE membership_requests SET status = 'approved', decided_at = ?1 WHERE id = ?2 AND status = 'pending'",
    )
    .bind(now)
    .bind(request.id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        // Lost the race: someone else decided first. Nothing written.
        return Ok(None);
    }

    user::insert_user(
        &mut *tx,
        user_id,
        &request.full_name,
        &request.email,
        request.phone.as_deref(),
        Role::Member,
        credential_ref,
        now,
    )
    .await?;
    member_profile::insert_empty(&mut *tx, user_id, now).await?;

    tx.commit().await?;
    Ok(Some(user_id))
}
