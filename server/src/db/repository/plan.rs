//! Plan Repository

use super::{member_profile, RepoError, RepoResult};
use shared::models::{Plan, PlanCreate, PlanUpdate};
use sqlx::SqlitePool;

const PLAN_SELECT: &str = "SELECT id, name, duration_months, price, description, is_active, created_at, updated_at FROM plans";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Plan>> {
    let sql = format!("{} ORDER BY id ASC", PLAN_SELECT);
    let rows = sqlx::query_as::<_, Plan>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Plan>> {
    let sql = format!("{} WHERE id = ?", PLAN_SELECT);
    let row = sqlx::query_as::<_, Plan>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Duplicate plan names surface as `RepoError::Duplicate` via the
/// UNIQUE constraint.
pub async fn create(pool: &SqlitePool, data: PlanCreate) -> RepoResult<Plan> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO plans (id, name, duration_months, price, description, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.duration_months)
    .bind(data.price)
    .bind(&data.description)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create plan".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PlanUpdate) -> RepoResult<Plan> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE plans SET name = COALESCE(?1, name), duration_months = COALESCE(?2, duration_months), price = COALESCE(?3, price), description = COALESCE(?4, description), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.duration_months)
    .bind(data.price)
    .bind(data.description)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Plan {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Plan {id} not found")))
}

/// Hard delete, refused while any member profile references the plan —
/// deactivating is the supported path for plans in use.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referencing = member_profile::count_referencing_plan(pool, id).await?;
    if referencing > 0 {
        return Err(RepoError::Duplicate(format!(
            "Plan {id} is enrolled by {referencing} member(s); deactivate it instead"
        )));
    }
    let rows = sqlx::query("DELETE FROM plans WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
