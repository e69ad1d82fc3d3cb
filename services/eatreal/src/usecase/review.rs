use chrono::{DateTime, Utc};

use eatreal_domain::ValidationError;
use eatreal_domain::geo::Coordinates;
use eatreal_domain::price::PriceTier;
use eatreal_domain::rating::Rating;

use crate::domain::repository::{RestaurantRepository, UserRepository, VisitRepository};
use crate::domain::types::{
    Image, NewImage, NewRestaurant, NewVisit, Review, ReviewFilter, User, VisitChanges,
};
use crate::error::EatRealError;
use crate::usecase::auth::non_blank;
use crate::usecase::restaurant::find_or_create_restaurant;

/// Number of reviews on the public feed.
pub const RECENT_REVIEWS_LIMIT: u64 = 10;

/// Owners may change their reviews; admins may change any review.
pub fn ensure_can_modify(actor: &User, review: &Review) -> Result<(), EatRealError> {
    if actor.admin || actor.id == review.user.id {
        Ok(())
    } else {
        Err(EatRealError::Forbidden)
    }
}

/// Drop entries without a URL and trim captions.
fn clean_images(images: Vec<NewImage>) -> Vec<NewImage> {
    images
        .into_iter()
        .filter_map(|image| {
            let url = image.url.trim();
            (!url.is_empty()).then(|| NewImage {
                url: url.to_owned(),
                caption: non_blank(image.caption),
            })
        })
        .collect()
}

/// Deduplicate companion ids and check they all exist.
async fn check_companions<U: UserRepository>(
    users: &U,
    mut ids: Vec<i32>,
) -> Result<Vec<i32>, EatRealError> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(ids);
    }
    let found = users.find_by_ids(&ids).await?;
    if found.len() != ids.len() {
        return Err(ValidationError::UnknownCompanion.into());
    }
    Ok(ids)
}

// ── ListReviews ──────────────────────────────────────────────────────────────

/// Filters accepted by the review listing. Combined with AND.
#[derive(Debug, Default)]
pub struct ReviewQuery {
    pub user_id: Option<i32>,
    pub restaurant_id: Option<i32>,
    /// Restaurant name or address fragment with the point to search around.
    pub restaurant_match: Option<(String, Coordinates)>,
}

pub struct ListReviewsUseCase<V, R>
where
    V: VisitRepository,
    R: RestaurantRepository,
{
    pub visits: V,
    pub restaurants: R,
}

impl<V, R> ListReviewsUseCase<V, R>
where
    V: VisitRepository,
    R: RestaurantRepository,
{
    pub async fn execute(&self, query: ReviewQuery) -> Result<Vec<Review>, EatRealError> {
        let mut restaurant_ids = query.restaurant_id.map(|id| vec![id]);
        if let Some((text, near)) = query.restaurant_match {
            let matched: Vec<i32> = self
                .restaurants
                .find_matching(text.trim(), near.match_window())
                .await?
                .into_iter()
                .map(|r| r.id)
                .filter(|id| restaurant_ids.as_ref().is_none_or(|ids| ids.contains(id)))
                .collect();
            restaurant_ids = Some(matched);
        }
        if restaurant_ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }
        self.visits
            .list(&ReviewFilter {
                user_id: query.user_id,
                restaurant_ids,
                limit: None,
            })
            .await
    }
}

// ── RecentReviews ────────────────────────────────────────────────────────────

pub struct RecentReviewsUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> RecentReviewsUseCase<V> {
    pub async fn execute(&self) -> Result<Vec<Review>, EatRealError> {
        self.visits
            .list(&ReviewFilter {
                limit: Some(RECENT_REVIEWS_LIMIT),
                ..ReviewFilter::default()
            })
            .await
    }
}

// ── GetReview ────────────────────────────────────────────────────────────────

pub struct GetReviewUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> GetReviewUseCase<V> {
    pub async fn execute(&self, id: i32) -> Result<Review, EatRealError> {
        self.visits
            .find_by_id(id)
            .await?
            .ok_or(EatRealError::ReviewNotFound)
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

/// Where the reviewed restaurant comes from.
pub enum RestaurantRef {
    Existing(i32),
    /// Resolved against known restaurants, created when nothing matches.
    Lookup(NewRestaurant),
}

pub struct CreateReviewInput {
    pub restaurant: RestaurantRef,
    pub rating: i32,
    pub review: Option<String>,
    pub price: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    pub companion_ids: Vec<i32>,
    pub images: Vec<NewImage>,
}

pub struct CreateReviewUseCase<V, R, U>
where
    V: VisitRepository,
    R: RestaurantRepository,
    U: UserRepository,
{
    pub visits: V,
    pub restaurants: R,
    pub users: U,
}

impl<V, R, U> CreateReviewUseCase<V, R, U>
where
    V: VisitRepository,
    R: RestaurantRepository,
    U: UserRepository,
{
    /// Returns the new visit id.
    pub async fn execute(&self, author: &User, input: CreateReviewInput) -> Result<i32, EatRealError> {
        let rating = Rating::new(input.rating)?;
        let price = PriceTier::parse_optional(input.price.as_deref())?;

        let restaurant = match input.restaurant {
            RestaurantRef::Existing(id) => self
                .restaurants
                .find_by_id(id)
                .await?
                .ok_or(EatRealError::RestaurantNotFound)?,
            RestaurantRef::Lookup(new) => find_or_create_restaurant(&self.restaurants, new).await?,
        };
        let companion_ids = check_companions(&self.users, input.companion_ids).await?;

        let visit_id = self
            .visits
            .create(&NewVisit {
                user_id: author.id,
                restaurant_id: restaurant.id,
                rating,
                review: non_blank(input.review),
                price,
                visited_at: input.visited_at.unwrap_or_else(Utc::now),
                companion_ids,
                images: clean_images(input.images),
            })
            .await?;
        tracing::info!(
            visit_id,
            user_id = author.id,
            restaurant_id = restaurant.id,
            "review created"
        );
        Ok(visit_id)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewInput {
    pub rating: i32,
    pub review: Option<String>,
    pub price: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    /// `Some` replaces the companion set.
    pub companion_ids: Option<Vec<i32>>,
    /// `Some` replaces the image set; an empty list removes every image.
    pub images: Option<Vec<NewImage>>,
}

pub struct UpdateReviewUseCase<V, U>
where
    V: VisitRepository,
    U: UserRepository,
{
    pub visits: V,
    pub users: U,
}

impl<V, U> UpdateReviewUseCase<V, U>
where
    V: VisitRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        actor: &User,
        id: i32,
        input: UpdateReviewInput,
    ) -> Result<(), EatRealError> {
        let existing = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or(EatRealError::ReviewNotFound)?;
        ensure_can_modify(actor, &existing)?;

        let rating = Rating::new(input.rating)?;
        let price = PriceTier::parse_optional(input.price.as_deref())?;
        let companion_ids = match input.companion_ids {
            Some(ids) => Some(check_companions(&self.users, ids).await?),
            None => None,
        };

        self.visits
            .update(
                id,
                &VisitChanges {
                    rating,
                    review: non_blank(input.review),
                    price,
                    visited_at: input.visited_at,
                    companion_ids,
                    images: input.images.map(clean_images),
                },
            )
            .await?;
        tracing::info!(visit_id = id, actor_id = actor.id, "review updated");
        Ok(())
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> DeleteReviewUseCase<V> {
    pub async fn execute(&self, actor: &User, id: i32) -> Result<(), EatRealError> {
        let existing = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or(EatRealError::ReviewNotFound)?;
        ensure_can_modify(actor, &existing)?;

        if !self.visits.delete_with_images(id).await? {
            return Err(EatRealError::ReviewNotFound);
        }
        tracing::info!(
            visit_id = id,
            actor_id = actor.id,
            images = existing.images.len(),
            "review deleted"
        );
        Ok(())
    }
}

// ── AddImage ─────────────────────────────────────────────────────────────────

pub struct AddImageUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> AddImageUseCase<V> {
    pub async fn execute(
        &self,
        actor: &User,
        visit_id: i32,
        image: NewImage,
    ) -> Result<Image, EatRealError> {
        let existing = self
            .visits
            .find_by_id(visit_id)
            .await?
            .ok_or(EatRealError::ReviewNotFound)?;
        ensure_can_modify(actor, &existing)?;

        let image = clean_images(vec![image])
            .pop()
            .ok_or(ValidationError::Required { field: "url" })?;
        self.visits.add_image(visit_id, &image).await
    }
}
