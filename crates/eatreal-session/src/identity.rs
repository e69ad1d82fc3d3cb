//! `X-User-Email` header extractor used by the mobile API.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use eatreal_core::error::error_response;

pub const X_USER_EMAIL: &str = "x-user-email";

/// Email the mobile client claims to act as.
///
/// The extractor only reads the header; resolving it to a stored user (and
/// rejecting unknown emails) is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailIdentity {
    pub email: String,
}

impl EmailIdentity {
    /// Read the header, ignoring blank or non-UTF-8 values.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(X_USER_EMAIL)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|email| Self {
                email: email.to_owned(),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityRejection {
    #[error("User email required")]
    MissingEmail,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, "EMAIL_REQUIRED", self.to_string())
    }
}

impl<S> FromRequestParts<S> for EmailIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = Self::from_headers(&parts.headers);
        async move { identity.ok_or(IdentityRejection::MissingEmail) }
    }
}
