use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body returned for every failed request.
///
/// ```json
/// { "success": false, "kind": "REVIEW_NOT_FOUND", "error": "Review not found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub kind: &'static str,
    pub error: String,
}

impl ErrorBody {
    pub fn new(kind: &'static str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            kind,
            error: error.into(),
        }
    }
}

pub fn error_response(status: StatusCode, kind: &'static str, error: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(kind, error))).into_response()
}
