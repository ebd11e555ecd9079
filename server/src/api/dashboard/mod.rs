//! Dashboard API 模块

use axum::{extract::State, routing::get, Json, Router};

use crate::core::ServerState;
use crate::membership::dashboard::dashboard_stats;
use crate::utils::AppResult;
use shared::models::DashboardStats;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard/stats", get(stats))
}

/// GET /api/dashboard/stats - 汇总统计（每次请求实时计算）
async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let stats = dashboard_stats(&state.pool, state.today()).await?;
    Ok(Json(stats))
}
