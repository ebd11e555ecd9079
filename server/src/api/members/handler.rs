//! Member API Handlers
//!
//! All expiry-sensitive reads pass the injected clock's "today" into
//! the lifecycle engine — the derived flags never come from stored
//! state.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use crate::core::ServerState;
use crate::db::repository::{attendance, member_profile, plan};
use crate::membership::{assignment, renewal, roster};
use crate::utils::{AppError, AppResult};
use shared::models::{
    AssignmentUpdate, AttendanceHistoryRow, DatesUpdate, HealthGoalsUpdate, MemberProfile,
    MemberSummary, Plan, StatusUpdate,
};

/// GET /api/members - 会员名单（含教练/计划名与过期标记）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MemberSummary>>> {
    let members = roster::list_members(&state.pool, state.today()).await?;
    Ok(Json(members))
}

/// GET /api/members/:id - 获取单个会员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MemberSummary>> {
    let member = roster::get_member(&state.pool, id, state.today()).await?;
    Ok(Json(member))
}

/// PUT /api/members/:id/assignment - 分配/清除教练与计划
pub async fn update_assignment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignmentUpdate>,
) -> AppResult<Json<MemberProfile>> {
    let profile = assignment::assign_trainer_and_plan(&state.pool, id, &payload).await?;
    Ok(Json(profile))
}

/// PUT /api/members/:id/status - 直接设置会籍状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<MemberProfile>> {
    let profile = assignment::update_status(&state.pool, id, payload.membership_status).await?;
    Ok(Json(profile))
}

/// PUT /api/members/:id/dates - 设置会籍起止日期
pub async fn update_dates(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DatesUpdate>,
) -> AppResult<Json<MemberProfile>> {
    let profile = assignment::update_membership_dates(&state.pool, id, &payload).await?;
    Ok(Json(profile))
}

/// PUT /api/members/:id/health-goals - 更新健康目标
pub async fn update_health_goals(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<HealthGoalsUpdate>,
) -> AppResult<Json<MemberProfile>> {
    member_profile::set_health_goals(&state.pool, id, payload.health_goals.as_deref()).await?;
    let profile = member_profile::find_by_user_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member profile {id} not found")))?;
    Ok(Json(profile))
}

/// Renewal outcome returned for caller confirmation/display
#[derive(serde::Serialize)]
pub struct RenewalResponse {
    pub member_id: i64,
    pub new_end_date: NaiveDate,
}

/// POST /api/members/:id/renew - 按当前计划续费一个周期
pub async fn renew(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RenewalResponse>> {
    let new_end_date = renewal::renew(&state.pool, id, state.today()).await?;
    Ok(Json(RenewalResponse {
        member_id: id,
        new_end_date,
    }))
}

/// GET /api/members/:id/plan - 当前会籍计划详情
pub async fn current_plan(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Plan>> {
    let profile = member_profile::find_by_user_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member profile {id} not found")))?;

    let plan_id = profile
        .current_plan_id
        .ok_or_else(|| AppError::not_found("No active membership plan found for this member"))?;

    let plan = plan::find_by_id(&state.pool, plan_id).await?.ok_or_else(|| {
        AppError::configuration(format!(
            "Assigned plan {plan_id} could not be retrieved for member {id}"
        ))
    })?;

    Ok(Json(plan))
}

/// GET /api/members/:id/attendance - 出勤历史（最新在前）
pub async fn attendance_history(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<AttendanceHistoryRow>>> {
    // Existence check keeps "unknown member" distinct from "no history"
    member_profile::find_by_user_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member profile {id} not found")))?;

    let history = attendance::history_for_member(&state.pool, id).await?;
    Ok(Json(history))
}
