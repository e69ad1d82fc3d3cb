use axum::{extract::State, http::StatusCode};

pub use eatreal_core::health::healthz;

use crate::state::AppState;

/// Handler for `GET /readyz`: 200 once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
