#![allow(async_fn_in_trait)]

use eatreal_domain::geo::BoundingBox;

use crate::domain::types::{
    IdentityClaims, Image, NewImage, NewRestaurant, NewUser, NewVisit, Place, Restaurant, Review,
    ReviewFilter, User, VisitChanges,
};
use crate::error::EatRealError;

/// Repository for accounts and friendships.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, EatRealError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, EatRealError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, EatRealError>;

    /// Insert a user. Fails with `UserAlreadyExists` when the email is taken.
    async fn create(&self, user: &NewUser) -> Result<User, EatRealError>;

    /// Insert a user unless the email is taken, then return the stored row.
    /// An existing user is returned unchanged.
    async fn create_if_absent(&self, user: &NewUser) -> Result<User, EatRealError>;

    async fn list_all(&self) -> Result<Vec<User>, EatRealError>;

    /// Users linked to `user_id` by a friendship in either direction.
    async fn list_friends(&self, user_id: i32) -> Result<Vec<User>, EatRealError>;

    /// Every user except `user_id`.
    async fn list_except(&self, user_id: i32) -> Result<Vec<User>, EatRealError>;
}

/// Repository for restaurants.
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, EatRealError>;

    /// Restaurants whose name or address contains `query` and whose position
    /// lies inside `window`, oldest first.
    async fn find_matching(
        &self,
        query: &str,
        window: BoundingBox,
    ) -> Result<Vec<Restaurant>, EatRealError>;

    async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, EatRealError>;
}

/// Repository for visits with their companions and images.
pub trait VisitRepository: Send + Sync {
    async fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, EatRealError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, EatRealError>;

    /// Insert the visit, its companion links and images atomically.
    /// Returns the new visit id.
    async fn create(&self, visit: &NewVisit) -> Result<i32, EatRealError>;

    async fn update(&self, id: i32, changes: &VisitChanges) -> Result<(), EatRealError>;

    async fn add_image(&self, visit_id: i32, image: &NewImage) -> Result<Image, EatRealError>;

    /// Delete images, companion links and the visit atomically.
    /// Returns `false` if the visit did not exist.
    async fn delete_with_images(&self, id: i32) -> Result<bool, EatRealError>;
}

/// OAuth2/OIDC authorization-code exchange.
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<IdentityClaims, EatRealError>;
}

/// Free-text place search.
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, EatRealError>;
}
