use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::Step;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DialogError {
    #[error("unexpected answer {value:?} in {} step", .step.as_str())]
    UnexpectedAnswer { step: Step, value: String },

    #[error("unexpected result {result} in {} step", .step.as_str())]
    UnexpectedResult { step: Step, result: String },

    #[error("missing {field} in {} step", .step.as_str())]
    MissingAnswer { step: Step, field: &'static str },
}

impl DialogError {
    pub fn step(&self) -> Step {
        match self {
            DialogError::UnexpectedAnswer { step, .. }
            | DialogError::UnexpectedResult { step, .. }
            | DialogError::MissingAnswer { step, .. } => *step,
        }
    }
}
