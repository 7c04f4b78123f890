use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::db::queries::{self, SessionStats};
use crate::errors::AppError;
use crate::models::{Profile, Step};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

fn lock_db(state: &AppState) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>, AppError> {
    state
        .db
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session store lock poisoned")))
}

// GET /api/admin/status
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionStats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = lock_db(&state)?;
    Ok(Json(queries::get_session_stats(&db)?))
}

// GET /api/admin/profiles/:conversation_id
#[derive(Serialize)]
pub struct ProfileResponse {
    pub conversation_id: String,
    pub profile: Profile,
    pub waiting_on: Option<Step>,
    pub updated_at: String,
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(conversation_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let session = {
        let db = lock_db(&state)?;
        queries::get_session(&db, &conversation_id)?
    }
    .ok_or_else(|| AppError::NotFound(format!("conversation {conversation_id}")))?;

    Ok(Json(ProfileResponse {
        conversation_id: session.conversation_id,
        profile: session.profile,
        waiting_on: session.dialog.map(|d| d.step),
        updated_at: session.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}

// POST /api/admin/profiles/:conversation_id/reset
pub async fn reset_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(conversation_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let deleted = {
        let db = lock_db(&state)?;
        queries::delete_session(&db, &conversation_id)?
    };
    if !deleted {
        return Err(AppError::NotFound(format!("conversation {conversation_id}")));
    }

    tracing::info!(conversation_id = %conversation_id, "session reset by admin");
    Ok(Json(serde_json::json!({ "success": true })))
}
