//! Membership Request API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::membership_request;
use crate::membership::requests::{decide_request, submit_request, DecisionOutcome};
use crate::utils::{AppError, AppResult};
use shared::models::{DecisionPayload, MembershipRequest, MembershipRequestCreate};

/// POST /api/requests - 公开提交入会申请
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<MembershipRequestCreate>,
) -> AppResult<Json<MembershipRequest>> {
    payload.validate()?;
    let request = submit_request(&state.pool, &payload).await?;
    Ok(Json(request))
}

/// GET /api/requests - 获取所有申请（最新在前）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MembershipRequest>>> {
    let requests = membership_request::find_all(&state.pool).await?;
    Ok(Json(requests))
}

/// Decision response: the decided request plus the provisioned member
/// id when the decision was an approval.
#[derive(serde::Serialize)]
pub struct DecisionResponse {
    #[serde(flatten)]
    pub request: MembershipRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
}

/// POST /api/requests/:id/decision - 审批申请（批准时自动开通会员）
pub async fn decide(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DecisionPayload>,
) -> AppResult<Json<DecisionResponse>> {
    let outcome = decide_request(&state.pool, id, payload.decision).await?;

    let request = membership_request::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Membership request {id} not found")))?;

    let member_id = match outcome {
        DecisionOutcome::Approved { member_id } => Some(member_id),
        DecisionOutcome::Rejected => None,
    };

    Ok(Json(DecisionResponse { request, member_id }))
}
