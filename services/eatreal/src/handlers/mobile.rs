//! `/api/*` routes used by the mobile client.
//!
//! Most routes identify the caller through `X-User-Email`; the delete-by-body
//! route and the current-user lookup also accept the browser session.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use eatreal_session::identity::EmailIdentity;
use eatreal_session::session::Session;

use crate::domain::types::{PublicUser, Review};
use crate::error::EatRealError;
use crate::handlers::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::handlers::reviews::{CreateReviewRequest, CreatedReviewResponse, UpdateReviewRequest};
use crate::handlers::{MessageResponse, SuccessResponse, header_user, session_user};
use crate::state::AppState;
use crate::usecase::auth::{CurrentUserUseCase, ListUsersUseCase, LoginUseCase, RegisterUseCase};
use crate::usecase::review::{
    CreateReviewUseCase, DeleteReviewUseCase, ListReviewsUseCase, ReviewQuery,
    UpdateReviewUseCase,
};

// ── POST /api/reviews ────────────────────────────────────────────────────────

pub async fn create_review(
    State(state): State<AppState>,
    identity: EmailIdentity,
    body: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let user = header_user(&state, &identity.email).await?;
    let Json(body) = body?;
    let visit_id = CreateReviewUseCase {
        visits: state.visit_repo(),
        restaurants: state.restaurant_repo(),
        users: state.user_repo(),
    }
    .execute(&user, body.try_into()?)
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedReviewResponse {
            success: true,
            visit_id,
        }),
    ))
}

// ── GET /api/reviews/user ────────────────────────────────────────────────────

pub async fn user_reviews(
    State(state): State<AppState>,
    identity: EmailIdentity,
) -> Result<Json<Vec<Review>>, EatRealError> {
    let user = header_user(&state, &identity.email).await?;
    let reviews = ListReviewsUseCase {
        visits: state.visit_repo(),
        restaurants: state.restaurant_repo(),
    }
    .execute(ReviewQuery {
        user_id: Some(user.id),
        ..ReviewQuery::default()
    })
    .await?;
    Ok(Json(reviews))
}

// ── PUT /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn update_review(
    State(state): State<AppState>,
    identity: EmailIdentity,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, EatRealError> {
    let user = header_user(&state, &identity.email).await?;
    let Path(id) = id?;
    let Json(body) = body?;
    UpdateReviewUseCase {
        visits: state.visit_repo(),
        users: state.user_repo(),
    }
    .execute(&user, id, body.try_into()?)
    .await?;
    Ok(Json(SuccessResponse::ok()))
}

// ── DELETE /api/reviews/{id} ─────────────────────────────────────────────────

pub async fn delete_review(
    State(state): State<AppState>,
    identity: EmailIdentity,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, EatRealError> {
    let user = header_user(&state, &identity.email).await?;
    let Path(id) = id?;
    DeleteReviewUseCase {
        visits: state.visit_repo(),
    }
    .execute(&user, id)
    .await?;
    Ok(Json(MessageResponse::ok("Review deleted successfully")))
}

// ── POST /api/reviews/delete ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteReviewRequest {
    pub review_id: i32,
}

pub async fn delete_review_by_body(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<DeleteReviewRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, EatRealError> {
    let user = session_user(&state, &session).await?;
    let Json(body) = body?;
    DeleteReviewUseCase {
        visits: state.visit_repo(),
    }
    .execute(&user, body.review_id)
    .await?;
    Ok(Json(MessageResponse::ok("Review deleted successfully")))
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let Json(body) = body?;
    let user = RegisterUseCase {
        repo: state.user_repo(),
    }
    .execute(body.into())
    .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, EatRealError> {
    let Json(body) = body?;
    let user = LoginUseCase {
        repo: state.user_repo(),
    }
    .execute(body.into())
    .await?;
    Ok(Json(UserResponse::from(&user)))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Logged out successfully"))
}

// ── GET /api/auth/user ───────────────────────────────────────────────────────

pub async fn current_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Json<PublicUser>, EatRealError> {
    let header = EmailIdentity::from_headers(&headers);
    let user = CurrentUserUseCase {
        repo: state.user_repo(),
    }
    .execute(&[session.email(), header.as_ref().map(|h| h.email.as_str())])
    .await?;
    Ok(Json(user.public()))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, EatRealError> {
    let users = ListUsersUseCase {
        repo: state.user_repo(),
    }
    .execute()
    .await?;
    Ok(Json(users.iter().map(|u| u.public()).collect()))
}
