//! `X-User-Email` headers as the mobile client sends them.

use http::{HeaderMap, HeaderName, HeaderValue};

use eatreal_session::identity::X_USER_EMAIL;

/// Caller identity for mobile-API requests.
pub struct MockIdentity {
    pub email: String,
}

impl MockIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(X_USER_EMAIL),
            HeaderValue::from_str(&self.email).unwrap(),
        )
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let (name, value) = self.header();
        map.insert(name, value);
        map
    }
}
