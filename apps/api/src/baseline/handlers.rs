use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::state::AppState;

/// GET /api/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ParsedResume> {
    Json(state.baseline.get().await)
}

/// PUT /api/resume
///
/// Replaces the baseline wholesale. An entirely empty resume is rejected.
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(resume): Json<ParsedResume>,
) -> Result<Json<ParsedResume>, AppError> {
    if resume.header.trim().is_empty() && resume.is_empty() {
        return Err(AppError::Validation("Resume data is required".to_string()));
    }

    let stored = state.baseline.replace(resume).await;
    info!(
        "Baseline resume replaced: {} experience, {} skills",
        stored.experience.len(),
        stored.skills.len()
    );
    Ok(Json(stored))
}
