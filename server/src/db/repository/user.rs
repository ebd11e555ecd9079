//! User Repository

use super::{member_profile, RepoError, RepoResult};
use shared::models::{Role, UserCreate, UserResponse, UserUpdate};
use sqlx::{SqliteConnection, SqlitePool};

const USER_SELECT: &str =
    "SELECT id, full_name, email, phone, role, created_at, updated_at FROM users";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UserResponse>> {
    let sql = format!("{} ORDER BY id DESC", USER_SELECT);
    let rows = sqlx::query_as::<_, UserResponse>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserResponse>> {
    let sql = format!("{} WHERE id = ?", USER_SELECT);
    let row = sqlx::query_as::<_, UserResponse>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all_by_role(pool: &SqlitePool, role: Role) -> RepoResult<Vec<UserResponse>> {
    let sql = format!("{} WHERE role = ? ORDER BY id DESC", USER_SELECT);
    let rows = sqlx::query_as::<_, UserResponse>(&sql)
        .bind(role)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_role(pool: &SqlitePool, role: Role) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a user row on an open connection/transaction.
/// Shared by [`create`] and the request-approval pipeline.
pub(crate) async fn insert_user(
    conn: &mut SqliteConnection,
    id: i64,
    full_name: &str,
    email: &str,
    phone: Option<&str>,
    role: Role,
    credential_ref: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO users (id, full_name, email, phone, role, credential_ref, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(credential_ref)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Create a user. A `member`-role user gets an empty membership profile
/// in the same transaction, keeping the one-profile-per-member invariant.
pub async fn create(
    pool: &SqlitePool,
    data: UserCreate,
    credential_ref: &str,
) -> RepoResult<UserResponse> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;
    insert_user(
        &mut *tx,
        id,
        &data.full_name,
        &data.email,
        data.phone.as_deref(),
        data.role,
        credential_ref,
        now,
    )
    .await?;
    if data.role == Role::Member {
        member_profile::insert_empty(&mut *tx, id, now).await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<UserResponse> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE users SET full_name = COALESCE(?1, full_name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.full_name)
    .bind(data.email)
    .bind(data.phone)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Hard delete. The member profile (if any) goes with it via FK cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
