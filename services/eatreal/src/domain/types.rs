use chrono::{DateTime, Utc};
use serde::Serialize;

use eatreal_core::serde::to_rfc3339_ms;
use eatreal_domain::geo::Coordinates;
use eatreal_domain::price::PriceTier;
use eatreal_domain::rating::Rating;

// ── Users ────────────────────────────────────────────────────────────────────

/// Stored account. Never serialized directly; see [`PublicUser`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2 PHC string. `None` for accounts created through OAuth.
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            admin: self.admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Account as exposed over HTTP, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Author or companion shown next to a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin: bool,
}

// ── Restaurants ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl Restaurant {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub id: i32,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub url: String,
    pub caption: Option<String>,
}

/// A visit with everything a page needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: i32,
    pub user: UserSummary,
    pub restaurant: Restaurant,
    pub rating: i32,
    pub review: Option<String>,
    pub price: Option<PriceTier>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub visited_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub images: Vec<Image>,
    pub companions: Vec<UserSummary>,
}

/// Which reviews to list. Unset fields do not filter. Results are always
/// ordered by `visited_at`, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    pub user_id: Option<i32>,
    pub restaurant_ids: Option<Vec<i32>>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NewVisit {
    pub user_id: i32,
    pub restaurant_id: i32,
    pub rating: Rating,
    pub review: Option<String>,
    pub price: Option<PriceTier>,
    pub visited_at: DateTime<Utc>,
    pub companion_ids: Vec<i32>,
    pub images: Vec<NewImage>,
}

/// Replacement values for an existing visit. `None` collections are left
/// untouched; `Some` replaces the whole set.
#[derive(Debug, Clone)]
pub struct VisitChanges {
    pub rating: Rating,
    pub review: Option<String>,
    pub price: Option<PriceTier>,
    pub visited_at: Option<DateTime<Utc>>,
    pub companion_ids: Option<Vec<i32>>,
    pub images: Option<Vec<NewImage>>,
}

// ── External services ────────────────────────────────────────────────────────

/// Identity claims returned by the OAuth provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityClaims {
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Geocoding search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}
