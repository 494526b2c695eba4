//! Mapbox integration for the taxi fare service
//!
//! Provides address geocoding via the
//! [Mapbox Geocoding API](https://docs.mapbox.com/api/search/geocoding/) and
//! driving routes via the
//! [Mapbox Directions API](https://docs.mapbox.com/api/navigation/directions/).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`GeocodingClient`] resolves a
//! free-text address to a coordinate and is implemented by
//! [`MapboxGeocodingClient`]. [`DirectionsClient`] computes a driving route
//! between two coordinates and is implemented by [`MapboxDirectionsClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_mapbox::{GeocodingClient, MapboxConfig, MapboxGeocodingClient};
//!
//! let config = MapboxConfig::with_token("pk.example");
//! let client = MapboxGeocodingClient::new(&config)?;
//!
//! let cochem = client.geocode("Endertplatz 1, Cochem").await?;
//! ```

mod config;
mod directions;
mod error;
mod geocoding;
mod http;
mod models;

pub use config::MapboxConfig;
pub use directions::{DirectionsClient, MapboxDirectionsClient};
pub use error::MapboxError;
pub use geocoding::{GeocodingClient, MapboxGeocodingClient};
pub use models::DrivingRoute;
