use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use eatreal_session::session::{Session, SessionData};

use crate::error::EatRealError;
use crate::state::AppState;
use crate::usecase::oauth::{CallbackInput, OAuthCallbackUseCase, start_authorization};

// ── GET /auth/oauth/login ────────────────────────────────────────────────────

pub async fn start_oauth(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let request = start_authorization(&state.oauth);
    let data = SessionData {
        oauth_state: Some(request.state),
        code_verifier: Some(request.code_verifier),
        ..session.data().clone()
    };
    (session.save(data), Redirect::to(request.url.as_str()))
}

// ── GET /api/callback ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

pub async fn oauth_callback(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let Query(query) = query?;
    let stored = session.data().clone();
    let user = OAuthCallbackUseCase {
        users: state.user_repo(),
        provider: state.identity_provider.clone(),
    }
    .execute(CallbackInput {
        code: query.code,
        state: query.state,
        stored_state: stored.oauth_state,
        code_verifier: stored.code_verifier,
    })
    .await?;

    // login() replaces the payload, which drops the state and verifier.
    let jar = session.login(user.email);
    Ok((StatusCode::FOUND, jar, [(header::LOCATION, "/")]))
}
