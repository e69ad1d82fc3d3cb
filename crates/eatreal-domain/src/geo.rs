//! Coordinates and the restaurant match window.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Half-width, in degrees, of the box used to decide that two points refer
/// to the same restaurant (about 100 m of latitude).
pub const MATCH_WINDOW_DEG: f64 = 0.001;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(ValidationError::InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// The match box centred on this point.
    pub fn match_window(self) -> BoundingBox {
        BoundingBox {
            min_latitude: self.latitude - MATCH_WINDOW_DEG,
            max_latitude: self.latitude + MATCH_WINDOW_DEG,
            min_longitude: self.longitude - MATCH_WINDOW_DEG,
            max_longitude: self.longitude + MATCH_WINDOW_DEG,
        }
    }
}

/// Inclusive latitude/longitude range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}
