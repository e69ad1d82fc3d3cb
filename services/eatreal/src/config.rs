use std::time::Duration;

use anyhow::{Context as _, anyhow};
use axum_extra::extract::cookie::Key;
use serde::Deserialize;
use url::Url;

use eatreal_core::config::Config;

/// EatReal configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct EatRealConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `EATREAL_PORT`.
    #[serde(default = "default_port")]
    pub eatreal_port: u16,
    /// Secret sealing the session cookie. At least 64 bytes.
    pub session_secret: String,
    /// `Secure` attribute on the session cookie (default true).
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_authorize_url: String,
    pub oauth_token_url: String,
    /// Absolute URL of `GET /api/callback` as registered with the provider.
    pub oauth_redirect_uri: String,
    #[serde(default = "default_scopes")]
    pub oauth_scopes: String,
    /// Base URL of a Nominatim-compatible search API.
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent.
    #[serde(default = "default_user_agent")]
    pub geocoding_user_agent: String,
    /// Timeout for outbound HTTP calls, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl Config for EatRealConfig {}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_scopes() -> String {
    "openid profile email".to_owned()
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_owned()
}

fn default_user_agent() -> String {
    concat!("eatreal/", env!("CARGO_PKG_VERSION")).to_owned()
}

fn default_http_timeout() -> u64 {
    10
}

impl EatRealConfig {
    pub fn session_key(&self) -> anyhow::Result<Key> {
        Key::try_from(self.session_secret.as_bytes())
            .map_err(|e| anyhow!("SESSION_SECRET is unusable: {e}"))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn oauth_authorize_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.oauth_authorize_url).context("OAUTH_AUTHORIZE_URL")
    }

    pub fn oauth_token_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.oauth_token_url).context("OAUTH_TOKEN_URL")
    }

    pub fn geocoding_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.geocoding_url).context("GEOCODING_URL")
    }
}
