use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use eatreal_core::error::error_response;
use eatreal_domain::ValidationError;

/// EatReal error variants. `Display` is the message shown to clients.
#[derive(Debug, thiserror::Error)]
pub enum EatRealError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid input data")]
    InvalidInput,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Please use OAuth login")]
    OAuthOnlyAccount,
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("User not found")]
    UnknownIdentity,
    #[error("User not found")]
    UserNotFound,
    #[error("Review not found")]
    ReviewNotFound,
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("You can only change your own reviews")]
    Forbidden,
    #[error("Invalid OAuth callback")]
    InvalidOAuthCallback,
    #[error("Identity provider error")]
    IdentityProvider,
    #[error("Geocoding service unavailable")]
    GeocodingUnavailable,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl EatRealError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::InvalidInput => "INVALID_INPUT",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::OAuthOnlyAccount => "OAUTH_ONLY_ACCOUNT",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UnknownIdentity => "UNKNOWN_IDENTITY",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidOAuthCallback => "INVALID_OAUTH_CALLBACK",
            Self::IdentityProvider => "IDENTITY_PROVIDER_ERROR",
            Self::GeocodingUnavailable => "GEOCODING_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidInput | Self::InvalidOAuthCallback => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials
            | Self::OAuthOnlyAccount
            | Self::Unauthenticated
            | Self::UnknownIdentity => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::ReviewNotFound | Self::RestaurantNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::IdentityProvider | Self::GeocodingUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for EatRealError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::InvalidInput
    }
}

impl From<QueryRejection> for EatRealError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        Self::InvalidInput
    }
}

impl From<PathRejection> for EatRealError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected path parameter");
        Self::InvalidInput
    }
}

impl IntoResponse for EatRealError {
    fn into_response(self) -> Response {
        // 4xx are expected client errors and TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
