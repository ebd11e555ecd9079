//! Membership Request API 模块

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/requests", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // 公开提交；列表与审批属于管理端
        .route("/", get(handler::list).post(handler::submit))
        .route("/{id}/decision", post(handler::decide))
}
