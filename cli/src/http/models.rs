//! HTTP API data models

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diffscope_core::api::{AnalysisRequest, ReviewError, TaskSpec};
use serde::{Deserialize, Serialize};

use crate::http::state::RequestCounters;

// ============= Review =============

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub file_path: String,
    #[serde(default)]
    pub old_code: String,
    pub new_code: String,
    #[serde(default)]
    pub language: String,
    /// Falls back to the configured default tasks when absent.
    #[serde(default)]
    pub tasks: Option<Vec<TaskSpec>>,
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl ReviewRequest {
    pub fn into_parts(self) -> (AnalysisRequest, Option<Vec<TaskSpec>>, Option<usize>) {
        let request =
            AnalysisRequest::new(self.file_path, self.old_code, self.new_code, self.language);
        (request, self.tasks, self.max_concurrency)
    }
}

// ============= Health =============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_seconds: f64,
    #[serde(flatten)]
    pub counters: RequestCounters,
    pub timestamp: String,
}

// ============= Errors =============

#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    UnknownTaskClass(String),
    Review(String),
    Timeout,
    Internal(String),
}

impl From<ReviewError> for HttpServerError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::UnknownTaskClass(_) => Self::UnknownTaskClass(err.to_string()),
            other => Self::Review(other.to_string()),
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            Self::UnknownTaskClass(msg) => (StatusCode::BAD_REQUEST, "UNKNOWN_TASK_CLASS", msg),
            Self::Review(msg) => (StatusCode::BAD_GATEWAY, "REVIEW_FAILED", msg),
            Self::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                "Request timeout".to_string(),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}
