//! Axum route handlers for the scoring and optimization API.

use axum::{extract::State, Json};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::fit_scoring::{match_keywords, AtsReport, KeywordMatch, ScoreStrategy};
use crate::generation::generator::{optimize_resume, OptimizeOutcome, OptimizeStrategy};
use crate::models::resume::ParsedResume;
use crate::parsing::parse_resume;
use crate::render::format_resume_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// A resume supplied either as raw text or as an already-parsed structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResumeInput {
    Text(String),
    Structured(ParsedResume),
}

impl ResumeInput {
    /// Text handed to the scorers. `None` when there is nothing to score.
    fn into_scoring_text(self) -> Option<String> {
        match self {
            ResumeInput::Text(text) if !text.trim().is_empty() => Some(text),
            ResumeInput::Text(_) => None,
            ResumeInput::Structured(resume) if resume.is_empty() => None,
            ResumeInput::Structured(resume) => Some(format_resume_text(&resume)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub resume: Option<ResumeInput>,
    pub job_description: Option<String>,
    pub strategy: Option<ScoreStrategy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeRequest {
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    pub scoring: Option<ScoreStrategy>,
    pub strategy: Option<OptimizeStrategy>,
}

fn require_resume(resume: Option<ResumeInput>) -> Result<String, AppError> {
    resume
        .and_then(ResumeInput::into_scoring_text)
        .ok_or_else(|| AppError::Validation("Resume text is required".to_string()))
}

fn require_text(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/calculate-ats-score
///
/// Scores a resume against a JD with the requested strategy, or the configured default.
pub async fn handle_calculate_ats_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    let resume_text = require_resume(request.resume)?;
    let job_description = require_text(request.job_description, "Job description is required")?;

    let strategy = request.strategy.unwrap_or(state.config.score_strategy);
    let report = strategy.scorer().score(&resume_text, &job_description)?;
    info!("ATS score {} ({strategy})", report.score);

    Ok(Json(report))
}

/// POST /api/match-keywords
pub async fn handle_match_keywords(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<KeywordMatch>, AppError> {
    let resume_text = require_resume(request.resume)?;
    let job_description = require_text(request.job_description, "Job description is required")?;

    Ok(Json(match_keywords(&resume_text, &job_description)?))
}

/// POST /api/parse-resume
pub async fn handle_parse_resume(
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    let resume_text = require_text(request.resume_text, "Resume text is required")?;
    Ok(Json(parse_resume(&resume_text)?))
}

/// POST /api/optimize-resume
///
/// Full pipeline: parse → score → tailor (or keyword append) → re-score → render.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeOutcome>, AppError> {
    let resume_text = require_text(request.resume_text, "Resume text is required")?;
    let job_description = require_text(request.job_description, "Job description is required")?;

    let scoring = request.scoring.unwrap_or(state.config.score_strategy);
    let strategy = request.strategy.unwrap_or(state.config.optimize_strategy);

    // The pipeline is CPU-bound; keep it off the async executor.
    let renderer = state.renderer.clone();
    let today = Local::now().date_naive();
    let outcome = tokio::task::spawn_blocking(move || {
        optimize_resume(
            &resume_text,
            &job_description,
            scoring.scorer(),
            strategy,
            renderer.as_ref(),
            today,
        )
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in optimization: {e}"))
    })??;

    Ok(Json(outcome))
}
