//! Trainer API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::{attendance, member_profile, session, user};
use crate::utils::{time, AppError, AppResult};
use shared::models::{
    AssignedMember, AttendanceRecord, CheckInPayload, CheckOutPayload, Role, Session,
    SessionCreate, SessionStatusUpdate, SessionUpdate, SessionWithMember, TrainerStats,
    UserResponse,
};

/// GET /api/trainers - 获取所有教练
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let trainers = user::find_all_by_role(&state.pool, Role::Trainer).await?;
    Ok(Json(trainers))
}

/// GET /api/trainers/:id/members - 名下学员（含在场标记）
pub async fn assigned_members(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<AssignedMember>>> {
    let members = member_profile::list_by_trainer(&state.pool, id).await?;
    Ok(Json(members))
}

/// GET /api/trainers/:id/stats - 教练工作台统计
pub async fn stats(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TrainerStats>> {
    let member_count = member_profile::count_by_trainer(&state.pool, id).await?;
    let stats = session::stats_for_trainer(&state.pool, id, member_count, state.today()).await?;
    Ok(Json(stats))
}

/// POST /api/trainers/:id/checkin - 为名下学员签到
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckInPayload>,
) -> AppResult<Json<AttendanceRecord>> {
    if !member_profile::is_assigned_to_trainer(&state.pool, payload.member_id, id).await? {
        return Err(AppError::business_rule("Member not assigned to this trainer"));
    }
    let record = attendance::check_in(&state.pool, payload.member_id, id).await?;
    Ok(Json(record))
}

/// POST /api/trainers/:id/checkout - 结束学员签到
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckOutPayload>,
) -> AppResult<Json<AttendanceRecord>> {
    let record = attendance::check_out(
        &state.pool,
        payload.member_id,
        id,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(Json(record))
}

/// GET /api/trainers/:id/sessions - 课程安排（日期时间升序）
pub async fn list_sessions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<SessionWithMember>>> {
    let sessions = session::list_for_trainer(&state.pool, id).await?;
    Ok(Json(sessions))
}

/// POST /api/trainers/:id/sessions - 预约课程
///
/// 学员必须已分配给该教练且会籍状态为 Active。
pub async fn create_session(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SessionCreate>,
) -> AppResult<Json<Session>> {
    time::parse_date(&payload.session_date)?;
    time::parse_time(&payload.session_time)?;

    if !member_profile::is_active_member_of_trainer(&state.pool, payload.member_id, id).await? {
        return Err(AppError::business_rule(
            "Member not assigned to this trainer or inactive",
        ));
    }

    let session = session::create(&state.pool, id, payload).await?;
    Ok(Json(session))
}

/// PUT /api/trainers/:id/sessions/:session_id - 修改已排期课程
pub async fn update_session(
    State(state): State<ServerState>,
    Path((id, session_id)): Path<(i64, i64)>,
    Json(payload): Json<SessionUpdate>,
) -> AppResult<Json<Session>> {
    time::parse_date(&payload.session_date)?;
    time::parse_time(&payload.session_time)?;

    let session = session::update(&state.pool, session_id, id, payload).await?;
    Ok(Json(session))
}

/// PUT /api/trainers/:id/sessions/:session_id/status - 完成/取消课程
pub async fn update_session_status(
    State(state): State<ServerState>,
    Path((id, session_id)): Path<(i64, i64)>,
    Json(payload): Json<SessionStatusUpdate>,
) -> AppResult<Json<Session>> {
    let session = session::set_status(&state.pool, session_id, id, payload.status).await?;
    Ok(Json(session))
}
