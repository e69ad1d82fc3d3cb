use serde::Serialize;

use eatreal_domain::stats::ReviewStats;

use crate::domain::repository::VisitRepository;
use crate::domain::types::{PublicUser, Review, ReviewFilter, User};
use crate::error::EatRealError;

#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: PublicUser,
    pub stats: ReviewStats,
    pub reviews: Vec<Review>,
}

/// The signed-in user's own reviews with summary statistics.
pub struct ProfileUseCase<V: VisitRepository> {
    pub visits: V,
}

impl<V: VisitRepository> ProfileUseCase<V> {
    pub async fn execute(&self, user: &User) -> Result<Profile, EatRealError> {
        let reviews = self
            .visits
            .list(&ReviewFilter {
                user_id: Some(user.id),
                ..ReviewFilter::default()
            })
            .await?;
        let stats = ReviewStats::from_ratings(reviews.iter().map(|r| (r.restaurant.id, r.rating)));
        Ok(Profile {
            user: user.public(),
            stats,
            reviews,
        })
    }
}
