pub mod admin;
pub mod dev;
pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/webhook/sms", post(webhook::sms_webhook))
        .route("/api/dev/message", post(dev::send_message))
        .route("/api/admin/status", get(admin::get_status))
        .route(
            "/api/admin/profiles/:conversation_id",
            get(admin::get_profile),
        )
        .route(
            "/api/admin/profiles/:conversation_id/reset",
            post(admin::reset_profile),
        )
        .with_state(state)
}
