//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;
use crate::geo;

/// A WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    lat: f64,
    /// Longitude in degrees (-180 to 180)
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not finite,
    /// latitude is not in [-90, 90] or longitude is not in [-180, 180]
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinates);
        }
        Ok(Self { lat, lon })
    }

    /// Create a coordinate without validation (for compile-time constants)
    #[must_use]
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate from a GeoJSON-style `[lon, lat]` pair
    ///
    /// # Errors
    ///
    /// Same as [`Coordinate::new`].
    pub fn from_lon_lat(pair: [f64; 2]) -> Result<Self, DomainError> {
        Self::new(pair[1], pair[0])
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// GeoJSON-style `[lon, lat]` pair
    #[must_use]
    pub const fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Great-circle distance to another coordinate in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        geo::haversine_distance_km(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let c = Coordinate::new(50.1475, 7.1685).unwrap();
        assert!((c.lat() - 50.1475).abs() < f64::EPSILON);
        assert!((c.lon() - 7.1685).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn invalid_latitude() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn invalid_longitude() {
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 7.0).is_err());
        assert!(Coordinate::new(50.0, f64::INFINITY).is_err());
    }

    #[test]
    fn lon_lat_pair_order() {
        let c = Coordinate::from_lon_lat([7.158, 50.159]).unwrap();
        assert!((c.lat() - 50.159).abs() < f64::EPSILON);
        assert!((c.lon() - 7.158).abs() < f64::EPSILON);
        assert_eq!(c.to_lon_lat(), [7.158, 50.159]);
    }

    #[test]
    fn display() {
        let c = Coordinate::new(50.1475, 7.1685).unwrap();
        let display = format!("{c}");
        assert!(display.contains("50.1475"));
        assert!(display.contains("7.1685"));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<Coordinate, _> = serde_json::from_str(r#"{"lat": 50.1, "lon": 7.1}"#);
        assert!(ok.is_ok());

        let bad: Result<Coordinate, _> = serde_json::from_str(r#"{"lat": 95.0, "lon": 7.1}"#);
        assert!(bad.is_err());
    }
}
