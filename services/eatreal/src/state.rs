use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;

use eatreal_session::session::SessionSettings;

use crate::infra::db::{DbRestaurantRepository, DbUserRepository, DbVisitRepository};
use crate::infra::geocode::HttpGeocoder;
use crate::infra::oauth::HttpIdentityProvider;
use crate::usecase::oauth::OAuthSettings;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_key: Key,
    pub session_settings: SessionSettings,
    pub oauth: OAuthSettings,
    pub identity_provider: HttpIdentityProvider,
    pub geocoder: HttpGeocoder,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn restaurant_repo(&self) -> DbRestaurantRepository {
        DbRestaurantRepository {
            db: self.db.clone(),
        }
    }

    pub fn visit_repo(&self) -> DbVisitRepository {
        DbVisitRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

impl FromRef<AppState> for SessionSettings {
    fn from_ref(state: &AppState) -> Self {
        state.session_settings
    }
}
