//! Routes that answer before touching the database or an upstream service.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use eatreal::infra::geocode::HttpGeocoder;
use eatreal::infra::oauth::HttpIdentityProvider;
use eatreal::router::build_router;
use eatreal::state::AppState;
use eatreal::usecase::oauth::{OAuthSettings, code_challenge};
use eatreal_session::session::{SessionData, SessionSettings};
use eatreal_testing::identity::MockIdentity;
use eatreal_testing::session::{read_session, session_cookie, session_set_cookie};

const AUTHORIZE_URL: &str = "https://id.example.com/authorize";

fn test_key() -> Key {
    Key::from(&[7u8; 64])
}

fn app() -> Router {
    // Port 9 (discard) on localhost: any accidental outbound call fails fast.
    let unreachable = Url::parse("http://127.0.0.1:9/").unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        session_key: test_key(),
        session_settings: SessionSettings { secure: false },
        oauth: OAuthSettings {
            client_id: "eatreal-web".to_owned(),
            authorize_url: Url::parse(AUTHORIZE_URL).unwrap(),
            redirect_uri: "http://localhost:3000/api/callback".to_owned(),
            scopes: "openid profile email".to_owned(),
        },
        identity_provider: HttpIdentityProvider::new(
            unreachable.clone(),
            "eatreal-web".to_owned(),
            "secret".to_owned(),
            "http://localhost:3000/api/callback".to_owned(),
            Duration::from_secs(1),
        )
        .unwrap(),
        geocoder: HttpGeocoder::new(unreachable, "eatreal-test".to_owned(), Duration::from_secs(1))
            .unwrap(),
    };
    build_router(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let response = app()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ── OAuth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_redirect_to_provider_and_remember_pkce_secrets() {
    let response = app()
        .oneshot(Request::get("/auth/oauth/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with(AUTHORIZE_URL));
    let params: std::collections::HashMap<_, _> = Url::parse(location)
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect();

    let session = read_session(&test_key(), &response);
    let verifier = session.code_verifier.expect("verifier stored in session");
    assert_eq!(session.oauth_state.as_deref(), Some(params["state"].as_str()));
    assert_eq!(params["code_challenge"], code_challenge(&verifier));
    assert_eq!(params["code_challenge_method"], "S256");
}

#[tokio::test]
async fn should_reject_callback_with_mismatched_state() {
    let cookie = session_cookie(
        &test_key(),
        SessionData {
            email: None,
            oauth_state: Some("expected".to_owned()),
            code_verifier: Some("verifier".to_owned()),
        },
    );
    let response = app()
        .oneshot(
            Request::get("/api/callback?code=abc&state=forged")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "INVALID_OAUTH_CALLBACK");
}

#[tokio::test]
async fn should_reject_callback_without_pending_authorization() {
    let response = app()
        .oneshot(
            Request::get("/api/callback?code=abc&state=s")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── Session auth ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_expire_session_on_logout() {
    let cookie = session_cookie(&test_key(), SessionData::logged_in("alice@example.com"));
    let response = app()
        .oneshot(
            Request::post("/auth/logout")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(session_set_cookie(&response).as_deref(), Some("eatreal_session="));
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn should_require_session_to_create_review() {
    let response = app()
        .oneshot(
            Request::post("/reviews")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"restaurant_id":1,"rating":5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "UNAUTHENTICATED");
    assert_eq!(body["error"], "User not authenticated");
}

#[tokio::test]
async fn should_reject_malformed_register_body() {
    let response = app()
        .oneshot(
            Request::post("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid input data");
}

#[tokio::test]
async fn should_reject_non_numeric_review_id() {
    let response = app()
        .oneshot(Request::get("/reviews/latest").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_require_query_for_map_search() {
    let response = app()
        .oneshot(Request::get("/map/search?q=").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "q is required");
}

// ── Mobile API ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_user_email_header() {
    let response = app()
        .oneshot(Request::get("/api/reviews/user").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "EMAIL_REQUIRED");
    assert_eq!(body["error"], "User email required");
}

#[tokio::test]
async fn should_treat_blank_user_email_header_as_missing() {
    let (name, value) = MockIdentity::new("   ").header();
    let response = app()
        .oneshot(
            Request::delete("/api/reviews/1")
                .header(name, value)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_allow_any_origin_on_mobile_routes() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/logout")
                .header(header::ORIGIN, "capacitor://localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(json_body(response).await["message"], "Logged out successfully");
}
