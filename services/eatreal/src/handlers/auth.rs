use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use eatreal_session::session::Session;

use crate::domain::types::{PublicUser, User};
use crate::error::EatRealError;
use crate::handlers::{MessageResponse, session_user};
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(body: RegisterRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(body: LoginRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: PublicUser,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            success: true,
            user: user.public(),
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let Json(body) = body?;
    let user = RegisterUseCase {
        repo: state.user_repo(),
    }
    .execute(body.into())
    .await?;

    let jar = session.login(user.email.as_str());
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let Json(body) = body?;
    let user = LoginUseCase {
        repo: state.user_repo(),
    }
    .execute(body.into())
    .await?;

    let jar = session.login(user.email.as_str());
    Ok((jar, Json(UserResponse::from(&user))))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(session: Session) -> impl IntoResponse {
    (session.clear(), Json(MessageResponse::ok("Logged out successfully")))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<UserResponse>, EatRealError> {
    let user = session_user(&state, &session).await?;
    Ok(Json(UserResponse::from(&user)))
}
