//! Driving route returned by the routing gateway

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// A driving route between two coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Driving distance in kilometers
    pub distance_km: f64,
    /// Full-resolution path geometry
    pub geometry: Vec<Coordinate>,
}

impl Route {
    /// Create a new route
    #[must_use]
    pub const fn new(distance_km: f64, geometry: Vec<Coordinate>) -> Self {
        Self {
            distance_km,
            geometry,
        }
    }

    /// Whether the distance can be priced
    #[must_use]
    pub fn has_usable_distance(&self) -> bool {
        self.distance_km.is_finite() && self.distance_km >= 0.0
    }
}
