//! Aggregate statistics shown on profile and restaurant pages.

use std::collections::HashSet;

use serde::Serialize;

/// Summary of a set of reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total_reviews: usize,
    /// Mean rating rounded to one decimal, `0.0` when there are no reviews.
    pub average_rating: f64,
    pub unique_restaurants: usize,
}

impl ReviewStats {
    /// Build statistics from `(restaurant_id, rating)` pairs.
    pub fn from_ratings<I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut total = 0usize;
        let mut sum = 0i64;
        let mut restaurants = HashSet::new();
        for (restaurant_id, rating) in reviews {
            total += 1;
            sum += rating as i64;
            restaurants.insert(restaurant_id);
        }
        let average_rating = if total == 0 {
            0.0
        } else {
            round_one_decimal(sum as f64 / total as f64)
        };
        Self {
            total_reviews: total,
            average_rating,
            unique_restaurants: restaurants.len(),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
