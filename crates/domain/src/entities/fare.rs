//! Fare quote and failure reasons

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, TariffWindow};

/// A successfully priced trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Final price including Anfahrt and buffer (EUR)
    pub price: f64,
    /// Driving distance of the trip in kilometers
    pub distance_km: f64,
    /// Route geometry of the trip
    pub geometry: Vec<Coordinate>,
    /// Tariff window used for pricing
    pub tariff_window: TariffWindow,
    /// Whether the trip qualified for an Anfahrt surcharge
    pub has_anfahrt: bool,
    /// Anfahrt surcharge, present only when positive
    pub anfahrt_fee: Option<f64>,
}

/// Why a fare could not be quoted
///
/// Each reason has a stable key that callers use to look up their own
/// localized display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareFailure {
    /// An address or the pickup time is missing
    MissingInput,
    /// The start address could not be resolved
    GeocodeFailedStart,
    /// The end address could not be resolved
    GeocodeFailedEnd,
    /// Neither address could be resolved
    GeocodeFailedBoth,
    /// No driving route between start and end
    RoutingFailed,
    /// Unexpected failure inside the pipeline
    Generic,
}

impl FareFailure {
    /// All failure reasons
    pub const ALL: [Self; 6] = [
        Self::MissingInput,
        Self::GeocodeFailedStart,
        Self::GeocodeFailedEnd,
        Self::GeocodeFailedBoth,
        Self::RoutingFailed,
        Self::Generic,
    ];

    /// Message catalog key for this reason
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::GeocodeFailedStart => "geocoding_start",
            Self::GeocodeFailedEnd => "geocoding_end",
            Self::GeocodeFailedBoth => "geocoding_both",
            Self::RoutingFailed => "routing",
            Self::Generic => "generic",
        }
    }

    /// Failure for the given combination of unresolved endpoints
    ///
    /// Returns `None` when both endpoints were resolved.
    #[must_use]
    pub const fn from_geocoding(start_found: bool, end_found: bool) -> Option<Self> {
        match (start_found, end_found) {
            (true, true) => None,
            (false, false) => Some(Self::GeocodeFailedBoth),
            (false, true) => Some(Self::GeocodeFailedStart),
            (true, false) => Some(Self::GeocodeFailedEnd),
        }
    }
}

impl fmt::Display for FareFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Result of a fare computation: exactly one of quote or failure
pub type FareOutcome = Result<FareQuote, FareFailure>;
