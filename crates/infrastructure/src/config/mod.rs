//! Application configuration
//!
//! Loaded once at start-up from an optional `config.toml` and `TAXIFARE_*`
//! environment variables, then validated. Sections:
//! - `server`: HTTP server settings
//! - `mapbox`: geocoding and directions API access
//! - `tariff`: pricing constants
//! - `zone`: home-service polygon and center
//! - `telemetry`: log filter and format

mod server;

use std::path::Path;

use domain::{ServiceZone, Tariff};
use integration_mapbox::MapboxConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use server::ServerConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TAXIFARE";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or deserializing a source failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A section failed validation
    #[error("Invalid {section} configuration: {message}")]
    Invalid {
        /// Offending section
        section: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Mapbox API configuration
    #[serde(default)]
    pub mapbox: MapboxConfig,

    /// Pricing constants
    #[serde(default)]
    pub tariff: Tariff,

    /// Home-service zone
    #[serde(default)]
    pub zone: ServiceZone,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// Environment variables override file values, e.g.
    /// `TAXIFARE_SERVER__PORT=8080` or `TAXIFARE_MAPBOX__ACCESS_TOKEN=pk...`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or the default
    /// optional `config.toml`, overlaid with environment variables
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?path, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |section: &'static str| {
            move |message: String| ConfigError::Invalid { section, message }
        };

        self.server.validate().map_err(invalid("server"))?;
        self.mapbox.validate().map_err(invalid("mapbox"))?;
        self.tariff
            .validate()
            .map_err(|e| invalid("tariff")(e.to_string()))?;
        self.zone
            .validate()
            .map_err(|e| invalid("zone")(e.to_string()))?;
        self.telemetry.validate().map_err(invalid("telemetry"))?;
        Ok(())
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            mapbox: MapboxConfig::for_testing(),
            ..Default::default()
        }
    }
}
