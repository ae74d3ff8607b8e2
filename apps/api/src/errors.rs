use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure raised by a core pipeline stage. Carries the stage name so callers
/// can tell which step rejected the input; a failing stage returns no partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("{stage} failed: {reason}")]
    InvalidInput { stage: &'static str, reason: String },
}

impl PipelineError {
    pub fn invalid_input(stage: &'static str, reason: impl Into<String>) -> Self {
        PipelineError::InvalidInput {
            stage,
            reason: reason.into(),
        }
    }
}

/// Rejects strings that are really binary payloads: embedded NULs, or text where
/// control characters outnumber a tenth of all characters.
pub fn ensure_textual(stage: &'static str, text: &str) -> Result<(), PipelineError> {
    if text.contains('\0') {
        return Err(PipelineError::invalid_input(
            stage,
            "input contains NUL bytes and is not text",
        ));
    }

    let total = text.chars().count();
    if total == 0 {
        return Ok(());
    }
    let control = text
        .chars()
        .filter(|c| c.is_control() && !c.is_whitespace())
        .count();
    if control * 10 > total {
        return Err(PipelineError::invalid_input(
            stage,
            format!("input is not text ({control} of {total} characters are control characters)"),
        ));
    }

    Ok(())
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(e) => {
                tracing::warn!("Pipeline rejected input: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PIPELINE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
