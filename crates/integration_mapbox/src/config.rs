//! Mapbox service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Mapbox geocoding and directions APIs
#[derive(Clone, Serialize, Deserialize)]
pub struct MapboxConfig {
    /// Base URL for the Mapbox API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Mapbox access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// ISO country filter for geocoding (empty disables the filter)
    #[serde(default = "default_country")]
    pub country: String,

    /// Geocoding proximity bias as `[lon, lat]`
    #[serde(default = "default_proximity")]
    pub proximity: Option<[f64; 2]>,

    /// Directions routing profile
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl std::fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("country", &self.country)
            .field("proximity", &self.proximity)
            .field("profile", &self.profile)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.mapbox.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_country() -> String {
    "de".to_string()
}

/// Cochem, Moselle
#[allow(clippy::unnecessary_wraps)] // serde default must match the field type
const fn default_proximity() -> Option<[f64; 2]> {
    Some([7.1667, 50.15])
}

fn default_profile() -> String {
    "mapbox/driving".to_string()
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            country: default_country(),
            proximity: default_proximity(),
            profile: default_profile(),
        }
    }
}

impl MapboxConfig {
    /// Default configuration with an access token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::from(token.into())),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Self::with_token("test-token")
        }
    }

    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Proximity bias formatted for the geocoding query
    #[must_use]
    pub fn proximity_param(&self) -> Option<String> {
        self.proximity.map(|[lon, lat]| format!("{lon},{lat}"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.access_token_str().is_none_or(str::is_empty) {
            return Err("access_token must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if let Some([lon, lat]) = self.proximity {
            if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                return Err("proximity must be a valid [lon, lat] pair".to_string());
            }
        }

        if self.profile.is_empty() {
            return Err("profile must not be empty".to_string());
        }

        Ok(())
    }
}
