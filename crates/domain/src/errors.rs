//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the WGS84 range or not finite
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Pickup time is not in `HH:MM` form
    #[error("Invalid pickup time: {0}")]
    InvalidPickupTime(String),

    /// Zone definition is unusable
    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    /// Tariff definition is unusable
    #[error("Invalid tariff: {0}")]
    InvalidTariff(String),
}
