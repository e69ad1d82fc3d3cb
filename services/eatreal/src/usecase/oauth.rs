use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;
use sha2::{Digest, Sha256};
use url::Url;

use eatreal_domain::account::{is_admin_email, parse_email};

use crate::domain::repository::{IdentityProvider, UserRepository};
use crate::domain::types::{NewUser, User};
use crate::error::EatRealError;
use crate::usecase::auth::non_blank;

/// RFC 7636 unreserved characters, valid in both `state` and a PKCE verifier.
const UNRESERVED: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// PKCE verifier length (RFC 7636 allows 43..=128).
pub const CODE_VERIFIER_LEN: usize = 64;

pub const STATE_LEN: usize = 32;

fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| UNRESERVED[rng.random_range(0..UNRESERVED.len())] as char)
        .collect()
}

/// S256 code challenge: `BASE64URL(SHA256(verifier))` without padding.
pub fn code_challenge(code_verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()))
}

/// Client registration used to build the authorization redirect.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub authorize_url: Url,
    pub redirect_uri: String,
    pub scopes: String,
}

// ── StartAuthorization ───────────────────────────────────────────────────────

/// Redirect target plus the secrets to keep in the session until the callback.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: Url,
    pub state: String,
    pub code_verifier: String,
}

pub fn start_authorization(settings: &OAuthSettings) -> AuthorizationRequest {
    let state = random_token(STATE_LEN);
    let code_verifier = random_token(CODE_VERIFIER_LEN);
    let mut url = settings.authorize_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &settings.client_id)
        .append_pair("redirect_uri", &settings.redirect_uri)
        .append_pair("scope", &settings.scopes)
        .append_pair("state", &state)
        .append_pair("code_challenge", &code_challenge(&code_verifier))
        .append_pair("code_challenge_method", "S256");
    AuthorizationRequest {
        url,
        state,
        code_verifier,
    }
}

// ── Callback ─────────────────────────────────────────────────────────────────

/// Query parameters of the callback next to the values stored at start.
pub struct CallbackInput {
    pub code: Option<String>,
    pub state: Option<String>,
    pub stored_state: Option<String>,
    pub code_verifier: Option<String>,
}

pub struct OAuthCallbackUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    pub users: U,
    pub provider: P,
}

impl<U, P> OAuthCallbackUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    pub async fn execute(&self, input: CallbackInput) -> Result<User, EatRealError> {
        let (Some(code), Some(state), Some(stored_state), Some(code_verifier)) = (
            input.code,
            input.state,
            input.stored_state,
            input.code_verifier,
        ) else {
            return Err(EatRealError::InvalidOAuthCallback);
        };
        if state != stored_state {
            tracing::warn!("oauth state mismatch");
            return Err(EatRealError::InvalidOAuthCallback);
        }

        let claims = self.provider.exchange_code(&code, &code_verifier).await?;
        let email = claims
            .email
            .as_deref()
            .ok_or(EatRealError::IdentityProvider)
            .and_then(|e| parse_email(e).map_err(|_| EatRealError::IdentityProvider))?;

        let admin = is_admin_email(&email);
        let user = self
            .users
            .create_if_absent(&NewUser {
                email,
                password_hash: None,
                first_name: non_blank(claims.given_name),
                last_name: non_blank(claims.family_name),
                admin,
            })
            .await?;
        tracing::info!(user_id = user.id, "oauth login");
        Ok(user)
    }
}
