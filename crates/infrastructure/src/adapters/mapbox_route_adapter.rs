//! Mapbox route adapter - Implements RouteGatewayPort using integration_mapbox

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::RouteGatewayPort;
use async_trait::async_trait;
use domain::{Coordinate, Route};
use integration_mapbox::{
    DirectionsClient, GeocodingClient, MapboxConfig, MapboxDirectionsClient, MapboxError,
    MapboxGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for geocoding and routing via the Mapbox APIs
pub struct MapboxRouteAdapter {
    geocoding_client: Arc<dyn GeocodingClient>,
    directions_client: Arc<dyn DirectionsClient>,
}

impl std::fmt::Debug for MapboxRouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxRouteAdapter")
            .field("geocoding_client", &"GeocodingClient")
            .field("directions_client", &"DirectionsClient")
            .finish()
    }
}

impl MapboxRouteAdapter {
    /// Create an adapter from existing clients
    pub fn new(
        geocoding_client: Arc<dyn GeocodingClient>,
        directions_client: Arc<dyn DirectionsClient>,
    ) -> Self {
        Self {
            geocoding_client,
            directions_client,
        }
    }

    /// Create an adapter backed by the Mapbox HTTP clients
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients fail to initialize.
    pub fn from_config(config: &MapboxConfig) -> Result<Self, ApplicationError> {
        let geocoding = MapboxGeocodingClient::new(config).map_err(Self::map_error)?;
        let directions = MapboxDirectionsClient::new(config).map_err(Self::map_error)?;
        Ok(Self::new(Arc::new(geocoding), Arc::new(directions)))
    }

    /// Map a Mapbox error to an application error
    fn map_error(error: MapboxError) -> ApplicationError {
        match error {
            MapboxError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            MapboxError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(format!("Mapbox: {other}")),
        }
    }
}

#[async_trait]
impl RouteGatewayPort for MapboxRouteAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError> {
        match self.geocoding_client.geocode(address).await {
            Ok(coordinate) => Ok(Some(coordinate)),
            Err(e) if e.is_not_found() => {
                debug!(%address, "Address not found");
                Ok(None)
            },
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<Option<Route>, ApplicationError> {
        match self.directions_client.driving_route(from, to).await {
            Ok(route) => Ok(Some(route.into())),
            Err(e) if e.is_not_found() => {
                debug!("No driving route");
                Ok(None)
            },
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
