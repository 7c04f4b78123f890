use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::services::session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DevMessage {
    pub conversation_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct DevResponse {
    pub conversation_id: String,
    pub replies: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DevMessage>,
) -> Json<DevResponse> {
    let conversation_id = payload
        .conversation_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("dev-{}", uuid::Uuid::new_v4()));

    match session::process_message(&state, &conversation_id, payload.message.trim()) {
        Ok(replies) => Json(DevResponse {
            conversation_id,
            replies,
            success: true,
            error: None,
        }),
        Err(e) => {
            tracing::error!(error = %e, conversation_id = %conversation_id, "dev turn failed");
            Json(DevResponse {
                conversation_id,
                replies: Vec::new(),
                success: false,
                error: Some(e.to_string()),
            })
        }
    }
}
