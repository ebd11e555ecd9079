//! Member API 模块

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/assignment", put(handler::update_assignment))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/dates", put(handler::update_dates))
        .route("/{id}/health-goals", put(handler::update_health_goals))
        .route("/{id}/renew", post(handler::renew))
        .route("/{id}/plan", get(handler::current_plan))
        .route("/{id}/attendance", get(handler::attendance_history))
}
