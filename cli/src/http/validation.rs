//! Basic request validation

use super::models::{HttpServerError, ReviewRequest};

const MAX_CODE_BYTES: usize = 1_000_000;

pub fn validate_review_request(req: &ReviewRequest) -> Result<(), HttpServerError> {
    if req.file_path.trim().is_empty() {
        return Err(HttpServerError::InvalidRequest(
            "file_path cannot be empty".to_string(),
        ));
    }

    if req.new_code.trim().is_empty() {
        return Err(HttpServerError::InvalidRequest(
            "new_code cannot be empty".to_string(),
        ));
    }

    let code_len = req.old_code.len() + req.new_code.len();
    if code_len > MAX_CODE_BYTES {
        return Err(HttpServerError::InvalidRequest(format!(
            "Code too long ({} bytes, max {})",
            code_len, MAX_CODE_BYTES
        )));
    }

    if req.max_concurrency == Some(0) {
        return Err(HttpServerError::InvalidRequest(
            "max_concurrency must be at least 1".to_string(),
        ));
    }

    Ok(())
}
