//! Trainer API 模块
//!
//! 教练侧操作全部以 `/api/trainers/{id}` 为前缀：教练身份来自路径，
//! 由上游授权协作方保证其与请求者一致。

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/trainers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/members", get(handler::assigned_members))
        .route("/{id}/stats", get(handler::stats))
        .route("/{id}/checkin", post(handler::check_in))
        .route("/{id}/checkout", post(handler::check_out))
        .route(
            "/{id}/sessions",
            get(handler::list_sessions).post(handler::create_session),
        )
        .route("/{id}/sessions/{session_id}", put(handler::update_session))
        .route(
            "/{id}/sessions/{session_id}/status",
            put(handler::update_session_status),
        )
}
