//! Mapbox directions client
//!
//! Computes driving routes with full GeoJSON geometry between two
//! coordinates.

use async_trait::async_trait;
use domain::Coordinate;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::MapboxConfig;
use crate::error::MapboxError;
use crate::http;
use crate::models::{DrivingRoute, RawDirectionsResponse};

/// Trait for directions clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Fastest driving route between two coordinates
    async fn driving_route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<DrivingRoute, MapboxError>;
}

/// Mapbox-based directions client
#[derive(Debug)]
pub struct MapboxDirectionsClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxDirectionsClient {
    /// Create a new Mapbox directions client
    ///
    /// # Errors
    ///
    /// Returns an error if no access token is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &MapboxConfig) -> Result<Self, MapboxError> {
        http::require_token(config)?;
        let client = http::build_client(config)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// `lon,lat;lon,lat` waypoint path segment
    fn waypoints(from: &Coordinate, to: &Coordinate) -> String {
        format!("{},{};{},{}", from.lon(), from.lat(), to.lon(), to.lat())
    }

    /// Parse the first route of a directions response
    fn parse_response(
        from: &Coordinate,
        to: &Coordinate,
        body: &str,
    ) -> Result<DrivingRoute, MapboxError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| MapboxError::ParseError(e.to_string()))?;

        let no_route = || MapboxError::NoRoute {
            from: from.to_string(),
            to: to.to_string(),
        };

        if raw.code != "Ok" {
            warn!(code = %raw.code, message = ?raw.message, "Directions API returned no route");
            return Err(no_route());
        }

        let route = raw.routes.into_iter().next().ok_or_else(no_route)?;
        let geometry = route
            .geometry
            .coordinates
            .into_iter()
            .map(Coordinate::from_lon_lat)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MapboxError::ParseError(e.to_string()))?;

        Ok(DrivingRoute {
            distance_m: route.distance,
            duration_s: route.duration,
            geometry,
        })
    }
}

#[async_trait]
impl DirectionsClient for MapboxDirectionsClient {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn driving_route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<DrivingRoute, MapboxError> {
        let waypoints = Self::waypoints(from, to);
        let mut segments = vec!["directions", "v5"];
        segments.extend(self.config.profile.split('/'));
        segments.push(&waypoints);
        let url = http::endpoint(&self.config.base_url, &segments)?;

        let params = [
            (
                "access_token",
                self.config.access_token_str().unwrap_or_default(),
            ),
            ("geometries", "geojson"),
            ("overview", "full"),
        ];

        debug!("Requesting driving route");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| http::send_error(&e, self.config.timeout_secs))?;

        let body = http::read_body(response).await?;
        let route = Self::parse_response(from, to, &body)?;

        debug!(
            distance_km = route.distance_km(),
            points = route.geometry.len(),
            "Driving route found"
        );
        Ok(route)
    }
}
