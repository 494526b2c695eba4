//! Pickup time value object

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Wall-clock pickup time parsed from `HH:MM`
///
/// Single-digit hours (`"6:05"`) are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PickupTime(NaiveTime);

impl PickupTime {
    /// Parse a pickup time from `HH:MM`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPickupTime` if the input is not a valid time
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        NaiveTime::parse_from_str(input.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| DomainError::InvalidPickupTime(input.to_string()))
    }

    /// Hour of day (0-23)
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of hour (0-59)
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for PickupTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PickupTime {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PickupTime> for String {
    fn from(value: PickupTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}
