//! Mapbox geocoding client
//!
//! Converts free-form address strings to coordinates using the
//! `mapbox.places` endpoint. Only the best-ranked feature is requested.

use async_trait::async_trait;
use domain::Coordinate;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::MapboxConfig;
use crate::error::MapboxError;
use crate::http;
use crate::models::RawGeocodingResponse;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to a coordinate
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapboxError>;
}

/// Mapbox-based geocoding client
#[derive(Debug)]
pub struct MapboxGeocodingClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxGeocodingClient {
    /// Create a new Mapbox geocoding client
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

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "access_token",
                self.config.access_token_str().unwrap_or_default().to_string(),
            ),
            ("limit", "1".to_string()),
        ];

        if !self.config.country.is_empty() {
            params.push(("country", self.config.country.clone()));
        }

        if let Some(proximity) = self.config.proximity_param() {
            params.push(("proximity", proximity));
        }

        params
    }

    /// Parse the first feature of a geocoding response
    fn parse_response(address: &str, body: &str) -> Result<Coordinate, MapboxError> {
        let raw: RawGeocodingResponse =
            serde_json::from_str(body).map_err(|e| MapboxError::ParseError(e.to_string()))?;

        let feature = raw
            .features
            .into_iter()
            .next()
            .ok_or_else(|| MapboxError::AddressNotFound(address.to_string()))?;

        debug!(place = ?feature.place_name, "Best geocoding match");

        Coordinate::from_lon_lat(feature.center)
            .map_err(|e| MapboxError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for MapboxGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapboxError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(MapboxError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        let file = format!("{address}.json");
        let url = http::endpoint(
            &self.config.base_url,
            &["geocoding", "v5", "mapbox.places", &file],
        )?;

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(url)
            .query(&self.query_params())
            .send()
            .await
            .map_err(|e| http::send_error(&e, self.config.timeout_secs))?;

        let body = http::read_body(response).await?;
        let coordinate = Self::parse_response(address, &body)?;

        debug!(%address, %coordinate, "Geocoded address");
        Ok(coordinate)
    }
}
