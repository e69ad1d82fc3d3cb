//! Sealed session cookie.
//!
//! The payload is JSON encrypted and authenticated with the application
//! [`Key`] (`PrivateCookieJar`). A cookie that fails to decrypt or parse
//! reads as an empty session.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use http::HeaderMap;
use http::request::Parts;
use serde::{Deserialize, Serialize};
use time::Duration;

/// Cookie name for the session.
pub const EATREAL_SESSION: &str = "eatreal_session";

/// Cookie Max-Age in seconds (7 days).
pub const SESSION_MAX_AGE: i64 = 604800;

/// Values kept across requests for one browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Email of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// CSRF state of a pending OAuth authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_state: Option<String>,
    /// PKCE verifier of a pending OAuth authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
}

impl SessionData {
    pub fn logged_in(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// Cookie attributes that depend on deployment.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Set the `Secure` attribute. Disable only for plain-HTTP development.
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { secure: true }
    }
}

/// Session of the current request.
///
/// Mutating methods consume the session and return the jar, which must be
/// part of the response for the change to reach the browser.
pub struct Session {
    jar: PrivateCookieJar,
    data: SessionData,
    settings: SessionSettings,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap, key: Key, settings: SessionSettings) -> Self {
        let jar = PrivateCookieJar::from_headers(headers, key);
        let data = jar
            .get(EATREAL_SESSION)
            .and_then(|cookie| match serde_json::from_str(cookie.value()) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::debug!(error = %e, "discarding unreadable session payload");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            jar,
            data,
            settings,
        }
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn email(&self) -> Option<&str> {
        self.data.email.as_deref()
    }

    /// Replace the session payload.
    pub fn save(self, data: SessionData) -> PrivateCookieJar {
        let value = serde_json::to_string(&data).expect("SessionData serializes to JSON");
        let cookie = Cookie::build((EATREAL_SESSION, value))
            .path("/")
            .max_age(Duration::seconds(SESSION_MAX_AGE))
            .http_only(true)
            .secure(self.settings.secure)
            .same_site(SameSite::Lax)
            .build();
        self.jar.add(cookie)
    }

    /// Store `email` as the logged-in user, dropping everything else.
    pub fn login(self, email: impl Into<String>) -> PrivateCookieJar {
        self.save(SessionData::logged_in(email))
    }

    /// Remove the cookie (Max-Age 0).
    pub fn clear(self) -> PrivateCookieJar {
        self.jar.remove(Cookie::build(EATREAL_SESSION).path("/"))
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionSettings: FromRef<S>,
{
    type Rejection = Infallible;

    // Values are read synchronously and moved into a 'static future so the
    // returned future does not borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = Session::from_headers(
            &parts.headers,
            Key::from_ref(state),
            SessionSettings::from_ref(state),
        );
        async move { Ok(session) }
    }
}
