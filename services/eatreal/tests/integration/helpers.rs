#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use eatreal::domain::repository::{
    Geocoder, IdentityProvider, RestaurantRepository, UserRepository, VisitRepository,
};
use eatreal::domain::types::{
    IdentityClaims, Image, NewImage, NewRestaurant, NewUser, NewVisit, Place, Restaurant, Review,
    ReviewFilter, User, UserSummary, VisitChanges,
};
use eatreal::error::EatRealError;
use eatreal::infra::password::hash_password;
use eatreal_domain::geo::BoundingBox;

// ── In-memory store ──────────────────────────────────────────────────────────

/// Rows shared by the mock repositories. Clones share the same data, so a
/// test keeps one handle for inspection after a usecase runs.
#[derive(Clone, Default)]
pub struct Store {
    pub users: Arc<Mutex<Vec<User>>>,
    pub friends: Arc<Mutex<Vec<(i32, i32)>>>,
    pub restaurants: Arc<Mutex<Vec<Restaurant>>>,
    pub reviews: Arc<Mutex<Vec<Review>>>,
}

impl Store {
    pub fn with_users(users: Vec<User>) -> Self {
        let store = Self::default();
        *store.users.lock().unwrap() = users;
        store
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo {
            store: self.clone(),
        }
    }

    pub fn restaurants(&self) -> MockRestaurantRepo {
        MockRestaurantRepo {
            store: self.clone(),
        }
    }

    pub fn visits(&self) -> MockVisitRepo {
        MockVisitRepo {
            store: self.clone(),
        }
    }

    pub fn add_restaurant(&self, name: &str, latitude: f64, longitude: f64) -> Restaurant {
        let mut restaurants = self.restaurants.lock().unwrap();
        let restaurant = Restaurant {
            id: restaurants.len() as i32 + 1,
            name: name.to_owned(),
            latitude,
            longitude,
            address: None,
        };
        restaurants.push(restaurant.clone());
        restaurant
    }

    pub fn visits_review(&self, id: i32) -> Review {
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.lock().unwrap().len()
    }

    pub fn image_count(&self) -> usize {
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.images.len())
            .sum()
    }

    fn summary(&self, user_id: i32) -> Option<UserSummary> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .map(User::summary)
    }

    fn next_image_id(&self) -> i32 {
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .flat_map(|r| r.images.iter().map(|i| i.id))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn images_from(&self, new_images: &[NewImage]) -> Vec<Image> {
        let first = self.next_image_id();
        new_images
            .iter()
            .enumerate()
            .map(|(n, image)| Image {
                id: first + n as i32,
                url: image.url.clone(),
                caption: image.caption.clone(),
            })
            .collect()
    }

    fn companions_from(&self, ids: &[i32]) -> Vec<UserSummary> {
        ids.iter().filter_map(|&id| self.summary(id)).collect()
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub store: Store,
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, EatRealError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, EatRealError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, EatRealError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, EatRealError> {
        let mut users = self.store.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(EatRealError::UserAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: users.len() as i32 + 1,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            admin: user.admin,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn create_if_absent(&self, user: &NewUser) -> Result<User, EatRealError> {
        match self.find_by_email(&user.email).await? {
            Some(existing) => Ok(existing),
            None => self.create(user).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, EatRealError> {
        Ok(self.store.users.lock().unwrap().clone())
    }

    async fn list_friends(&self, user_id: i32) -> Result<Vec<User>, EatRealError> {
        let ids: Vec<i32> = self
            .store
            .friends
            .lock()
            .unwrap()
            .iter()
            .filter_map(|&(a, b)| match (a == user_id, b == user_id) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .collect();
        self.find_by_ids(&ids).await
    }

    async fn list_except(&self, user_id: i32) -> Result<Vec<User>, EatRealError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id != user_id)
            .cloned()
            .collect())
    }
}

// ── MockRestaurantRepo ───────────────────────────────────────────────────────

pub struct MockRestaurantRepo {
    pub store: Store,
}

impl RestaurantRepository for MockRestaurantRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, EatRealError> {
        Ok(self
            .store
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_matching(
        &self,
        query: &str,
        window: BoundingBox,
    ) -> Result<Vec<Restaurant>, EatRealError> {
        Ok(self
            .store
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                let text_match = r.name.contains(query)
                    || r.address.as_deref().is_some_and(|a| a.contains(query));
                text_match && window.contains(r.coordinates())
            })
            .cloned()
            .collect())
    }

    async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, EatRealError> {
        let mut restaurants = self.store.restaurants.lock().unwrap();
        let created = Restaurant {
            id: restaurants.len() as i32 + 1,
            name: restaurant.name.clone(),
            latitude: restaurant.coordinates.latitude,
            longitude: restaurant.coordinates.longitude,
            address: restaurant.address.clone(),
        };
        restaurants.push(created.clone());
        Ok(created)
    }
}

// ── MockVisitRepo ────────────────────────────────────────────────────────────

pub struct MockVisitRepo {
    pub store: Store,
}

impl VisitRepository for MockVisitRepo {
    async fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, EatRealError> {
        let mut reviews: Vec<Review> = self
            .store
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.user_id.is_none_or(|id| r.user.id == id))
            .filter(|r| {
                filter
                    .restaurant_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&r.restaurant.id))
            })
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        if let Some(limit) = filter.limit {
            reviews.truncate(limit as usize);
        }
        Ok(reviews)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, EatRealError> {
        Ok(self
            .store
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create(&self, visit: &NewVisit) -> Result<i32, EatRealError> {
        let user = self
            .store
            .summary(visit.user_id)
            .ok_or_else(|| anyhow::anyhow!("author missing"))?;
        let restaurant = self
            .store
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == visit.restaurant_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("restaurant missing"))?;
        let images = self.store.images_from(&visit.images);
        let companions = self.store.companions_from(&visit.companion_ids);

        let mut reviews = self.store.reviews.lock().unwrap();
        let id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        reviews.push(Review {
            id,
            user,
            restaurant,
            rating: visit.rating.get(),
            review: visit.review.clone(),
            price: visit.price,
            visited_at: visit.visited_at,
            created_at: now,
            updated_at: now,
            images,
            companions,
        });
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &VisitChanges) -> Result<(), EatRealError> {
        let images = changes
            .images
            .as_ref()
            .map(|images| self.store.images_from(images));
        let companions = changes
            .companion_ids
            .as_ref()
            .map(|ids| self.store.companions_from(ids));

        let mut reviews = self.store.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EatRealError::ReviewNotFound)?;
        review.rating = changes.rating.get();
        review.review = changes.review.clone();
        review.price = changes.price;
        if let Some(visited_at) = changes.visited_at {
            review.visited_at = visited_at;
        }
        if let Some(images) = images {
            review.images = images;
        }
        if let Some(companions) = companions {
            review.companions = companions;
        }
        review.updated_at = Utc::now();
        Ok(())
    }

    async fn add_image(&self, visit_id: i32, image: &NewImage) -> Result<Image, EatRealError> {
        let created = self
            .store
            .images_from(std::slice::from_ref(image))
            .remove(0);
        let mut reviews = self.store.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == visit_id)
            .ok_or(EatRealError::ReviewNotFound)?;
        review.images.push(created.clone());
        Ok(created)
    }

    async fn delete_with_images(&self, id: i32) -> Result<bool, EatRealError> {
        let mut reviews = self.store.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        Ok(reviews.len() < before)
    }
}

// ── MockIdentityProvider ─────────────────────────────────────────────────────

pub struct MockIdentityProvider {
    pub claims: IdentityClaims,
    /// `(code, code_verifier)` of every exchange.
    pub exchanges: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockIdentityProvider {
    pub fn returning(claims: IdentityClaims) -> Self {
        Self {
            claims,
            exchanges: Arc::default(),
        }
    }

    pub fn exchanges_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.exchanges)
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<IdentityClaims, EatRealError> {
        self.exchanges
            .lock()
            .unwrap()
            .push((code.to_owned(), code_verifier.to_owned()));
        Ok(self.claims.clone())
    }
}

// ── MockGeocoder ─────────────────────────────────────────────────────────────

pub struct MockGeocoder {
    /// `None` simulates an unreachable upstream.
    pub places: Option<Vec<Place>>,
    pub queries: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockGeocoder {
    pub fn returning(places: Vec<Place>) -> Self {
        Self {
            places: Some(places),
            queries: Arc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            places: None,
            queries: Arc::default(),
        }
    }
}

impl Geocoder for MockGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, EatRealError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_owned(), limit));
        let places = self
            .places
            .clone()
            .ok_or(EatRealError::GeocodingUnavailable)?;
        Ok(places.into_iter().take(limit).collect())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "correct-horse";

pub fn test_user(id: i32, email: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        password_hash: None,
        first_name: None,
        last_name: None,
        admin: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn local_user(id: i32, email: &str) -> User {
    User {
        password_hash: Some(hash_password(TEST_PASSWORD).unwrap()),
        ..test_user(id, email)
    }
}

pub fn admin_user(id: i32, email: &str) -> User {
    User {
        admin: true,
        ..test_user(id, email)
    }
}

/// A stored review by `author` at `restaurant`, visited `days_ago` days ago.
pub fn seed_review(
    store: &Store,
    author: &User,
    restaurant: &Restaurant,
    rating: i32,
    days_ago: i64,
    image_urls: &[&str],
) -> i32 {
    let visited_at: DateTime<Utc> = Utc::now() - Duration::days(days_ago);
    let images = store.images_from(
        &image_urls
            .iter()
            .map(|url| NewImage {
                url: (*url).to_owned(),
                caption: None,
            })
            .collect::<Vec<_>>(),
    );
    let mut reviews = store.reviews.lock().unwrap();
    let id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    reviews.push(Review {
        id,
        user: author.summary(),
        restaurant: restaurant.clone(),
        rating,
        review: None,
        price: None,
        visited_at,
        created_at: visited_at,
        updated_at: visited_at,
        images,
        companions: vec![],
    });
    id
}
