pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::baseline::handlers as baseline;
use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Baseline resume
        .route(
            "/api/resume",
            get(baseline::handle_get_resume).put(baseline::handle_put_resume),
        )
        // Scoring
        .route(
            "/api/calculate-ats-score",
            post(handlers::handle_calculate_ats_score),
        )
        .route("/api/match-keywords", post(handlers::handle_match_keywords))
        // Parsing and optimization
        .route("/api/parse-resume", post(handlers::handle_parse_resume))
        .route(
            "/api/optimize-resume",
            post(handlers::handle_optimize_resume),
        )
        .fallback(not_found)
        .with_state(state)
}
