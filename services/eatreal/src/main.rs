use sea_orm::Database;
use tracing::info;

use eatreal::config::EatRealConfig;
use eatreal::infra::geocode::HttpGeocoder;
use eatreal::infra::oauth::HttpIdentityProvider;
use eatreal::router::build_router;
use eatreal::state::AppState;
use eatreal::usecase::oauth::OAuthSettings;
use eatreal_core::config::Config as _;
use eatreal_core::tracing::init_tracing;
use eatreal_session::session::SessionSettings;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = EatRealConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let session_key = config.session_key().expect("invalid SESSION_SECRET");

    let oauth = OAuthSettings {
        client_id: config.oauth_client_id.clone(),
        authorize_url: config
            .oauth_authorize_url()
            .expect("invalid OAUTH_AUTHORIZE_URL"),
        redirect_uri: config.oauth_redirect_uri.clone(),
        scopes: config.oauth_scopes.clone(),
    };

    let identity_provider = HttpIdentityProvider::new(
        config.oauth_token_url().expect("invalid OAUTH_TOKEN_URL"),
        config.oauth_client_id.clone(),
        config.oauth_client_secret.clone(),
        config.oauth_redirect_uri.clone(),
        config.http_timeout(),
    )
    .expect("failed to build OAuth HTTP client");

    let geocoder = HttpGeocoder::new(
        config.geocoding_url().expect("invalid GEOCODING_URL"),
        config.geocoding_user_agent.clone(),
        config.http_timeout(),
    )
    .expect("failed to build geocoding HTTP client");

    let state = AppState {
        db,
        session_key,
        session_settings: SessionSettings {
            secure: config.cookie_secure,
        },
        oauth,
        identity_provider,
        geocoder,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.eatreal_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("eatreal listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
