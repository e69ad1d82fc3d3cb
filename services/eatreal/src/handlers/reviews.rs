use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eatreal_domain::ValidationError;
use eatreal_domain::geo::Coordinates;
use eatreal_session::session::Session;

use crate::domain::types::{Image, NewImage, NewRestaurant, Review};
use crate::error::EatRealError;
use crate::handlers::{MessageResponse, SuccessResponse, session_user};
use crate::state::AppState;
use crate::usecase::auth::non_blank;
use crate::usecase::review::{
    AddImageUseCase, CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase,
    GetReviewUseCase, ListReviewsUseCase, RestaurantRef, ReviewQuery, UpdateReviewInput,
    UpdateReviewUseCase,
};

// ── DTOs shared with the mobile API ──────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    pub user_id: Option<i32>,
    pub restaurant_id: Option<i32>,
    /// Restaurant name or address fragment; requires `lat` and `lon`.
    pub restaurant: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl TryFrom<ReviewListQuery> for ReviewQuery {
    type Error = EatRealError;

    fn try_from(query: ReviewListQuery) -> Result<Self, Self::Error> {
        let restaurant_match = match non_blank(query.restaurant) {
            Some(text) => {
                let lat = query.lat.ok_or(ValidationError::Required { field: "lat" })?;
                let lon = query.lon.ok_or(ValidationError::Required { field: "lon" })?;
                Some((text, Coordinates::new(lat, lon)?))
            }
            None => None,
        };
        Ok(Self {
            user_id: query.user_id,
            restaurant_id: query.restaurant_id,
            restaurant_match,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl From<ImageRequest> for NewImage {
    fn from(image: ImageRequest) -> Self {
        Self {
            url: image.url,
            caption: image.caption,
        }
    }
}

/// Review body. The restaurant is either `restaurant_id` or
/// `restaurant_name` with `latitude`, `longitude` and an optional `address`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub restaurant_id: Option<i32>,
    pub restaurant_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub price: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub companions: Vec<i32>,
    #[serde(default)]
    pub images: Vec<ImageRequest>,
}

impl TryFrom<CreateReviewRequest> for CreateReviewInput {
    type Error = EatRealError;

    fn try_from(body: CreateReviewRequest) -> Result<Self, Self::Error> {
        let restaurant = match body.restaurant_id {
            Some(id) => RestaurantRef::Existing(id),
            None => {
                let name = non_blank(body.restaurant_name).ok_or(ValidationError::Required {
                    field: "restaurant_name",
                })?;
                let latitude = body
                    .latitude
                    .ok_or(ValidationError::Required { field: "latitude" })?;
                let longitude = body
                    .longitude
                    .ok_or(ValidationError::Required { field: "longitude" })?;
                RestaurantRef::Lookup(NewRestaurant {
                    name,
                    coordinates: Coordinates::new(latitude, longitude)?,
                    address: body.address,
                })
            }
        };
        Ok(Self {
            restaurant,
            rating: body
                .rating
                .ok_or(ValidationError::Required { field: "rating" })?,
            review: body.review,
            price: body.price,
            visited_at: body.visited_at,
            companion_ids: body.companions,
            images: body.images.into_iter().map(NewImage::from).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub price: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    pub companions: Option<Vec<i32>>,
    pub images: Option<Vec<ImageRequest>>,
}

impl TryFrom<UpdateReviewRequest> for UpdateReviewInput {
    type Error = EatRealError;

    fn try_from(body: UpdateReviewRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            rating: body
                .rating
                .ok_or(ValidationError::Required { field: "rating" })?,
            review: body.review,
            price: body.price,
            visited_at: body.visited_at,
            companion_ids: body.companions,
            images: body
                .images
                .map(|images| images.into_iter().map(NewImage::from).collect()),
        })
    }
}

#[derive(Serialize)]
pub struct CreatedReviewResponse {
    pub success: bool,
    pub visit_id: i32,
}

#[derive(Serialize)]
pub struct ImageResponse {
    pub success: bool,
    pub image: Image,
}

// ── GET /reviews ─────────────────────────────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    query: Result<Query<ReviewListQuery>, QueryRejection>,
) -> Result<Json<Vec<Review>>, EatRealError> {
    let Query(query) = query?;
    let reviews = ListReviewsUseCase {
        visits: state.visit_repo(),
        restaurants: state.restaurant_repo(),
    }
    .execute(query.try_into()?)
    .await?;
    Ok(Json(reviews))
}

// ── POST /reviews ────────────────────────────────────────────────────────────

pub async fn create_review(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let user = session_user(&state, &session).await?;
    let Json(body) = body?;
    let visit_id = CreateReviewUseCase {
        visits: state.visit_repo(),
        restaurants: state.restaurant_repo(),
        users: state.user_repo(),
    }
    .execute(&user, body.try_into()?)
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedReviewResponse {
            success: true,
            visit_id,
        }),
    ))
}

// ── GET /reviews/{id} ────────────────────────────────────────────────────────

pub async fn get_review(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Review>, EatRealError> {
    let Path(id) = id?;
    let review = GetReviewUseCase {
        visits: state.visit_repo(),
    }
    .execute(id)
    .await?;
    Ok(Json(review))
}

// ── PUT /reviews/{id} ────────────────────────────────────────────────────────

pub async fn update_review(
    State(state): State<AppState>,
    session: Session,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, EatRealError> {
    let user = session_user(&state, &session).await?;
    let Path(id) = id?;
    let Json(body) = body?;
    UpdateReviewUseCase {
        visits: state.visit_repo(),
        users: state.user_repo(),
    }
    .execute(&user, id, body.try_into()?)
    .await?;
    Ok(Json(SuccessResponse::ok()))
}

// ── DELETE /reviews/{id} ─────────────────────────────────────────────────────

pub async fn delete_review(
    State(state): State<AppState>,
    session: Session,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, EatRealError> {
    let user = session_user(&state, &session).await?;
    let Path(id) = id?;
    DeleteReviewUseCase {
        visits: state.visit_repo(),
    }
    .execute(&user, id)
    .await?;
    Ok(Json(MessageResponse::ok("Review deleted successfully")))
}

// ── POST /reviews/{id}/images ────────────────────────────────────────────────

pub async fn add_image(
    State(state): State<AppState>,
    session: Session,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, EatRealError> {
    let user = session_user(&state, &session).await?;
    let Path(id) = id?;
    let Json(body) = body?;
    let image = AddImageUseCase {
        visits: state.visit_repo(),
    }
    .execute(&user, id, body.into())
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ImageResponse {
            success: true,
            image,
        }),
    ))
}
