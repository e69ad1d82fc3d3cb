use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Deserialize;

use eatreal_domain::ValidationError;
use eatreal_domain::geo::Coordinates;
use eatreal_session::session::Session;

use crate::domain::types::{Place, PublicUser, Restaurant, Review};
use crate::error::EatRealError;
use crate::handlers::session_user;
use crate::state::AppState;
use crate::usecase::auth::CompanionCandidatesUseCase;
use crate::usecase::map::MapSearchUseCase;
use crate::usecase::profile::{Profile, ProfileUseCase};
use crate::usecase::restaurant::{RestaurantPage, RestaurantPageUseCase, SearchRestaurantsUseCase};
use crate::usecase::review::RecentReviewsUseCase;

// ── GET /feed ────────────────────────────────────────────────────────────────

pub async fn feed(State(state): State<AppState>) -> Result<Json<Vec<Review>>, EatRealError> {
    let reviews = RecentReviewsUseCase {
        visits: state.visit_repo(),
    }
    .execute()
    .await?;
    Ok(Json(reviews))
}

// ── GET /profile ─────────────────────────────────────────────────────────────

pub async fn profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Profile>, EatRealError> {
    let user = session_user(&state, &session).await?;
    let profile = ProfileUseCase {
        visits: state.visit_repo(),
    }
    .execute(&user)
    .await?;
    Ok(Json(profile))
}

// ── GET /friends ─────────────────────────────────────────────────────────────

pub async fn friends(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<PublicUser>>, EatRealError> {
    let user = session_user(&state, &session).await?;
    let candidates = CompanionCandidatesUseCase {
        repo: state.user_repo(),
    }
    .execute(&user)
    .await?;
    Ok(Json(candidates.iter().map(|u| u.public()).collect()))
}

// ── GET /restaurants/{id} ────────────────────────────────────────────────────

pub async fn restaurant_page(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantPage>, EatRealError> {
    let Path(id) = id?;
    let page = RestaurantPageUseCase {
        restaurants: state.restaurant_repo(),
        visits: state.visit_repo(),
    }
    .execute(id)
    .await?;
    Ok(Json(page))
}

// ── GET /restaurants/search ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RestaurantSearchQuery {
    #[serde(default)]
    pub q: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub async fn search_restaurants(
    State(state): State<AppState>,
    query: Result<Query<RestaurantSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Restaurant>>, EatRealError> {
    let Query(query) = query?;
    let lat = query.lat.ok_or(ValidationError::Required { field: "lat" })?;
    let lon = query.lon.ok_or(ValidationError::Required { field: "lon" })?;
    let restaurants = SearchRestaurantsUseCase {
        repo: state.restaurant_repo(),
    }
    .execute(&query.q, Coordinates::new(lat, lon)?)
    .await?;
    Ok(Json(restaurants))
}

// ── GET /map/search ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MapSearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn map_search(
    State(state): State<AppState>,
    query: Result<Query<MapSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Place>>, EatRealError> {
    let Query(query) = query?;
    let places = MapSearchUseCase {
        geocoder: state.geocoder.clone(),
    }
    .execute(&query.q)
    .await?;
    Ok(Json(places))
}
