use eatreal_domain::ValidationError;

use crate::domain::repository::Geocoder;
use crate::domain::types::Place;
use crate::error::EatRealError;

/// Results returned for one map search.
pub const MAP_SEARCH_LIMIT: usize = 5;

pub struct MapSearchUseCase<G: Geocoder> {
    pub geocoder: G,
}

impl<G: Geocoder> MapSearchUseCase<G> {
    pub async fn execute(&self, query: &str) -> Result<Vec<Place>, EatRealError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::Required { field: "q" }.into());
        }
        self.geocoder.search(query, MAP_SEARCH_LIMIT).await
    }
}
