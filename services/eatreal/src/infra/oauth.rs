use std::time::Duration;

use jsonwebtoken::dangerous::insecure_decode;
use reqwest::{Client, header};
use serde::Deserialize;
use url::Url;

use crate::domain::repository::IdentityProvider;
use crate::domain::types::IdentityClaims;
use crate::error::EatRealError;

/// Authorization-code exchange against the provider's token endpoint.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl HttpIdentityProvider {
    pub fn new(
        token_url: Url,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token_url,
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    fn token_request_body(&self, code: &str, code_verifier: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("code", code)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("code_verifier", code_verifier)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    id_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct JwtClaims {
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

impl From<JwtClaims> for IdentityClaims {
    fn from(claims: JwtClaims) -> Self {
        Self {
            email: claims.email,
            given_name: claims.given_name,
            family_name: claims.family_name,
        }
    }
}

/// Claims of a JWT, or `None` for opaque tokens. Signatures are not checked:
/// the token comes straight from the token endpoint over TLS.
fn decode_jwt_claims(token: &str) -> Option<IdentityClaims> {
    insecure_decode::<JwtClaims>(token)
        .ok()
        .map(|data| data.claims.into())
}

/// ID-token claims, overridden by any claim the access token also carries.
fn merge_claims(id: Option<IdentityClaims>, access: Option<IdentityClaims>) -> IdentityClaims {
    let id = id.unwrap_or_default();
    let access = access.unwrap_or_default();
    IdentityClaims {
        email: access.email.or(id.email),
        given_name: access.given_name.or(id.given_name),
        family_name: access.family_name.or(id.family_name),
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<IdentityClaims, EatRealError> {
        let response = self
            .client
            .post(self.token_url.clone())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::ACCEPT, "application/json")
            .body(self.token_request_body(code, code_verifier))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token endpoint unreachable");
                EatRealError::IdentityProvider
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "token response unreadable");
            EatRealError::IdentityProvider
        })?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token exchange rejected");
            return Err(EatRealError::IdentityProvider);
        }

        let tokens: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "token response is not valid JSON");
            EatRealError::IdentityProvider
        })?;
        Ok(merge_claims(
            tokens.id_token.as_deref().and_then(decode_jwt_claims),
            tokens.access_token.as_deref().and_then(decode_jwt_claims),
        ))
    }
}
