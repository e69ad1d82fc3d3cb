pub mod auth;
pub mod health;
pub mod mobile;
pub mod oauth;
pub mod reviews;
pub mod views;

use serde::Serialize;

use eatreal_session::session::Session;

use crate::domain::types::User;
use crate::error::EatRealError;
use crate::state::AppState;
use crate::usecase::auth::AuthenticateUseCase;

/// Load the user named by the session, or fail with 401.
async fn session_user(state: &AppState, session: &Session) -> Result<User, EatRealError> {
    AuthenticateUseCase {
        repo: state.user_repo(),
    }
    .execute(session.email())
    .await
}

/// Load the user named by an `X-User-Email` header value.
async fn header_user(state: &AppState, email: &str) -> Result<User, EatRealError> {
    AuthenticateUseCase {
        repo: state.user_repo(),
    }
    .execute(Some(email))
    .await
}

/// `{ "success": true, "message": ... }`
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// `{ "success": true }`
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
