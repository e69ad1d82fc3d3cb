//! Sealed session cookies for requests and responses.

use axum::response::IntoResponse;
use axum_extra::extract::cookie::Key;
use http::{HeaderMap, HeaderValue, Response, header};

use eatreal_session::session::{EATREAL_SESSION, Session, SessionData, SessionSettings};

/// Seal `data` with `key` and return a `Cookie` request header value.
pub fn session_cookie(key: &Key, data: SessionData) -> HeaderValue {
    let jar = Session::from_headers(&HeaderMap::new(), key.clone(), SessionSettings::default())
        .save(data);
    let response = jar.into_response();
    let pair = session_set_cookie(&response).expect("jar did not set the session cookie");
    HeaderValue::from_str(&pair).unwrap()
}

/// `name=value` of the session `Set-Cookie` header in `response`, if any.
pub fn session_set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{EATREAL_SESSION}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

/// Open the session cookie carried by `response` with `key`.
///
/// Returns the default session when no cookie was set or it does not decrypt.
pub fn read_session<B>(key: &Key, response: &Response<B>) -> SessionData {
    let Some(pair) = session_set_cookie(response) else {
        return SessionData::default();
    };
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
    Session::from_headers(&headers, key.clone(), SessionSettings::default())
        .data()
        .clone()
}
