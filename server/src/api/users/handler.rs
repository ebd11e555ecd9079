//! User API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};
use shared::models::{Role, UserCreate, UserResponse, UserUpdate};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub role: Option<Role>,
}

/// GET /api/users?role=trainer - 获取用户（可按角色过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = match query.role {
        Some(role) => user::find_all_by_role(&state.pool, role).await?,
        None => user::find_all(&state.pool).await?,
    };
    Ok(Json(users))
}

/// GET /api/users/:id - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(Json(user))
}

/// POST /api/users - 创建用户
///
/// A `member`-role user gets an empty membership profile in the same
/// transaction. The credential reference is a placeholder; the real
/// credential is issued by the external auth collaborator.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;
    let credential_ref = shared::util::opaque_token();
    let user = user::create(&state.pool, payload, &credential_ref).await?;
    Ok(Json(user))
}

/// PUT /api/users/:id - 更新用户基本信息（角色不可变）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    if payload.full_name.is_none() && payload.email.is_none() && payload.phone.is_none() {
        return Err(AppError::validation("No fields provided for update"));
    }
    let user = user::update(&state.pool, id, payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - 删除用户（会员档案随之级联删除）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = user::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::not_found(format!("User {id} not found")));
    }
    Ok(Json(result))
}
