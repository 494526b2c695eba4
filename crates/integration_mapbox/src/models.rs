//! Mapbox response models

use domain::{Coordinate, Route};
use serde::Deserialize;

/// A driving route as reported by the Directions API
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingRoute {
    /// Route length in meters
    pub distance_m: f64,
    /// Expected travel time in seconds
    pub duration_s: f64,
    /// Full-resolution path
    pub geometry: Vec<Coordinate>,
}

impl DrivingRoute {
    /// Route length in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

impl From<DrivingRoute> for Route {
    fn from(route: DrivingRoute) -> Self {
        Self::new(route.distance_km(), route.geometry)
    }
}

/// Raw geocoding response (GeoJSON feature collection)
#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodingResponse {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

/// Raw geocoding feature
#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    /// `[lon, lat]`
    pub center: [f64; 2],
    #[serde(default)]
    pub place_name: Option<String>,
}

/// Raw directions response
#[derive(Debug, Deserialize)]
pub(crate) struct RawDirectionsResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

/// Raw directions route
#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub geometry: RawLineString,
}

/// GeoJSON line string
#[derive(Debug, Deserialize)]
pub(crate) struct RawLineString {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}
