//! HTTP middleware

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, Request},
    middleware::{self, Next},
    response::Response,
    BoxError, Router,
};
use std::time::{Duration, Instant};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::http::models::HttpServerError;

/// Wrap `router` with request logging, CORS and the per-request timeout.
///
/// Timeouts come back as the regular JSON error body (`error_code: "TIMEOUT"`).
pub fn apply_middleware(router: Router, request_timeout: Duration) -> Router {
    router.layer(middleware::from_fn(request_logger)).layer(
        ServiceBuilder::new()
            .layer(create_cors_layer())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> HttpServerError {
    if err.is::<tower::timeout::error::Elapsed>() {
        HttpServerError::Timeout
    } else {
        HttpServerError::Internal(err.to_string())
    }
}

/// Only localhost origins are allowed.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            |origin: &HeaderValue, _| {
                origin
                    .to_str()
                    .map(is_local_origin)
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

fn is_local_origin(origin: &str) -> bool {
    ["http://localhost", "https://localhost", "http://127.0.0.1", "https://127.0.0.1"]
        .iter()
        .any(|prefix| origin.starts_with(prefix))
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}
