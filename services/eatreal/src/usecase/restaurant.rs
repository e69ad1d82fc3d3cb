use serde::Serialize;

use eatreal_domain::ValidationError;
use eatreal_domain::geo::Coordinates;
use eatreal_domain::stats::ReviewStats;

use crate::domain::repository::{RestaurantRepository, VisitRepository};
use crate::domain::types::{NewRestaurant, Restaurant, Review, ReviewFilter};
use crate::error::EatRealError;
use crate::usecase::auth::non_blank;

/// Reuse a restaurant named like `new` within the match window, or create it.
pub(crate) async fn find_or_create_restaurant<R: RestaurantRepository>(
    repo: &R,
    new: NewRestaurant,
) -> Result<Restaurant, EatRealError> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" }.into());
    }
    let window = new.coordinates.match_window();
    if let Some(existing) = repo.find_matching(name, window).await?.into_iter().next() {
        return Ok(existing);
    }
    let created = repo
        .create(&NewRestaurant {
            name: name.to_owned(),
            coordinates: new.coordinates,
            address: non_blank(new.address),
        })
        .await?;
    tracing::info!(restaurant_id = created.id, "restaurant created");
    Ok(created)
}

// ── SearchRestaurants ────────────────────────────────────────────────────────

pub struct SearchRestaurantsUseCase<R: RestaurantRepository> {
    pub repo: R,
}

impl<R: RestaurantRepository> SearchRestaurantsUseCase<R> {
    pub async fn execute(
        &self,
        query: &str,
        near: Coordinates,
    ) -> Result<Vec<Restaurant>, EatRealError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::Required { field: "q" }.into());
        }
        self.repo.find_matching(query, near.match_window()).await
    }
}

// ── RestaurantPage ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RestaurantPage {
    pub restaurant: Restaurant,
    pub stats: ReviewStats,
    pub reviews: Vec<Review>,
}

pub struct RestaurantPageUseCase<R, V>
where
    R: RestaurantRepository,
    V: VisitRepository,
{
    pub restaurants: R,
    pub visits: V,
}

impl<R, V> RestaurantPageUseCase<R, V>
where
    R: RestaurantRepository,
    V: VisitRepository,
{
    pub async fn execute(&self, restaurant_id: i32) -> Result<RestaurantPage, EatRealError> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or(EatRealError::RestaurantNotFound)?;
        let reviews = self
            .visits
            .list(&ReviewFilter {
                restaurant_ids: Some(vec![restaurant_id]),
                ..ReviewFilter::default()
            })
            .await?;
        let stats = ReviewStats::from_ratings(reviews.iter().map(|r| (r.restaurant.id, r.rating)));
        Ok(RestaurantPage {
            restaurant,
            stats,
            reviews,
        })
    }
}
