use axum::http::StatusCode;

/// Handler for `GET /healthz`, the liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
