//! Shared reqwest plumbing for the HTTP backends: error classification and
//! body previews.

use diffscope_core::api::{BackendError, BackendErrorKind};
use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 512;

pub(crate) fn build_client(timeout_ms: u64) -> anyhow::Result<reqwest::Client> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .build()?;
    Ok(http)
}

pub(crate) fn from_reqwest(err: reqwest::Error, url: &str) -> BackendError {
    let kind = if err.is_timeout() {
        BackendErrorKind::Timeout
    } else if err.is_connect() {
        BackendErrorKind::Connect
    } else if err.is_request() || err.is_body() {
        BackendErrorKind::Request
    } else if err.is_decode() {
        BackendErrorKind::Decode
    } else {
        BackendErrorKind::Unknown
    };
    let mut out = BackendError::new(kind, err.to_string()).with_url(url);
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out.with_source(err)
}

pub(crate) fn status_error(status: u16, url: &str, body: &str) -> BackendError {
    BackendError::new(BackendErrorKind::Status, preview_body(body))
        .with_status(status)
        .with_url(url)
}

pub(crate) fn decode_error(status: u16, url: &str, err: serde_json::Error, body: &str) -> BackendError {
    let message = format!(
        "failed to decode response body: {} | body={}",
        err,
        preview_body(body)
    );
    BackendError::new(BackendErrorKind::Decode, message)
        .with_status(status)
        .with_url(url)
        .with_source(err)
}

pub(crate) fn empty_error(status: u16, url: &str) -> BackendError {
    BackendError::new(BackendErrorKind::Empty, "backend returned no text")
        .with_status(status)
        .with_url(url)
}

pub(crate) fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Successful response body, as text.
pub(crate) struct RawResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl RawResponse {
    pub fn json(&self) -> Result<Value, BackendError> {
        serde_json::from_str::<Value>(&self.body)
            .map_err(|err| decode_error(self.status, &self.url, err, &self.body))
    }
}

/// POST `payload` as JSON and read the body, failing on non-2xx statuses.
pub(crate) async fn post_json(
    http: &reqwest::Client,
    url: &str,
    api_key: &str,
    payload: &Value,
) -> Result<RawResponse, BackendError> {
    let mut req = http.post(url).json(payload);
    if !api_key.trim().is_empty() {
        req = req.bearer_auth(api_key);
    }

    let resp = req.send().await.map_err(|err| from_reqwest(err, url))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|err| from_reqwest(err, url))?;

    if !status.is_success() {
        return Err(status_error(status.as_u16(), url, &body));
    }

    Ok(RawResponse {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}
