//! HTTP route handlers

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use diffscope_core::api::AggregateResult;

use crate::http::{
    models::*,
    state::AppState,
    validation::validate_review_request,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/code/review", post(review_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /code/review
async fn review_handler(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<AggregateResult>, HttpServerError> {
    state.record_request("/code/review");

    validate_review_request(&req)?;

    let (request, tasks, max_concurrency) = req.into_parts();
    match state.ctx.review(request, tasks, max_concurrency).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            state.record_error();
            Err(e.into())
        }
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    state.record_request("/health");
    let (uptime_seconds, counters) = state.snapshot();

    Json(HealthResponse {
        status: "healthy".into(),
        backend: state.ctx.backend().name().to_string(),
        uptime_seconds,
        counters,
        timestamp: Local::now().to_rfc3339(),
    })
}
