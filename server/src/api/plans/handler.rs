//! Plan API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::plan;
use crate::utils::{AppError, AppResult};
use shared::models::{Plan, PlanCreate, PlanUpdate};

/// GET /api/plans - 获取所有计划
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Plan>>> {
    let plans = plan::find_all(&state.pool).await?;
    Ok(Json(plans))
}

/// GET /api/plans/:id - 获取单个计划
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Plan>> {
    let plan = plan::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Plan {id} not found")))?;
    Ok(Json(plan))
}

/// POST /api/plans - 创建计划（重名返回 409）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PlanCreate>,
) -> AppResult<Json<Plan>> {
    payload.validate()?;
    let plan = plan::create(&state.pool, payload).await?;
    Ok(Json(plan))
}

/// PUT /api/plans/:id - 更新计划
///
/// Identical data is a successful no-op, not an error; an empty payload
/// is rejected.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PlanUpdate>,
) -> AppResult<Json<Plan>> {
    let no_fields = payload.name.is_none()
        && payload.duration_months.is_none()
        && payload.price.is_none()
        && payload.description.is_none()
        && payload.is_active.is_none();
    if no_fields {
        return Err(AppError::validation("No fields provided for update"));
    }

    if let Some(months) = payload.duration_months {
        if months < 1 {
            return Err(AppError::validation("duration_months must be at least 1"));
        }
    }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::validation("price cannot be negative"));
        }
    }

    let plan = plan::update(&state.pool, id, payload).await?;
    Ok(Json(plan))
}

/// DELETE /api/plans/:id - 删除计划（被引用时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = plan::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::not_found(format!("Plan {id} not found")));
    }
    Ok(Json(result))
}
