use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use eatreal_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, logout, me, register},
    health::{healthz, readyz},
    mobile,
    oauth::{oauth_callback, start_oauth},
    reviews::{add_image, create_review, delete_review, get_review, list_reviews, update_review},
    views::{feed, friends, map_search, profile, restaurant_page, search_restaurants},
};
use crate::state::AppState;

/// Routes called by the mobile client. Responses allow any origin.
fn mobile_router() -> Router<AppState> {
    Router::new()
        // Reviews
        .route("/reviews", get(list_reviews).post(mobile::create_review))
        .route("/reviews/recent", get(feed))
        .route("/reviews/user", get(mobile::user_reviews))
        .route("/reviews/delete", post(mobile::delete_review_by_body))
        .route(
            "/reviews/{id}",
            get(get_review)
                .put(mobile::update_review)
                .delete(mobile::delete_review),
        )
        // Auth
        .route("/auth/register", post(mobile::register))
        .route("/auth/login", post(mobile::login))
        .route("/auth/logout", post(mobile::logout))
        .route("/auth/user", get(mobile::current_user))
        // Users
        .route("/users", get(mobile::list_users))
        .layer(CorsLayer::permissive())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        // OAuth
        .route("/auth/oauth/login", get(start_oauth))
        .route("/api/callback", get(oauth_callback))
        // Reviews
        .route("/reviews", get(list_reviews).post(create_review))
        .route(
            "/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/reviews/{id}/images", post(add_image))
        // Views
        .route("/feed", get(feed))
        .route("/profile", get(profile))
        .route("/friends", get(friends))
        .route("/restaurants/search", get(search_restaurants))
        .route("/restaurants/{id}", get(restaurant_page))
        .route("/map/search", get(map_search))
        // Mobile API
        .nest("/api", mobile_router())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
