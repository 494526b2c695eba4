//! Tariff value objects
//!
//! A [`Tariff`] holds the pricing constants; the [`TariffWindow`] is picked
//! from the pickup hour. The night window wraps midnight: it starts at
//! `night_start_hour` inclusive and ends at `night_end_hour` exclusive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::PickupTime;

/// Day or night rate regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TariffWindow {
    Day,
    Night,
}

impl fmt::Display for TariffWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Pricing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Flat fee added to every trip (EUR)
    #[serde(default = "default_base_fee")]
    pub base_fee: f64,

    /// Rate per driven kilometer during the day (EUR)
    #[serde(default = "default_rate_per_km_day")]
    pub rate_per_km_day: f64,

    /// Rate per driven kilometer during the night (EUR)
    #[serde(default = "default_rate_per_km_night")]
    pub rate_per_km_night: f64,

    /// First hour of the night window (inclusive)
    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: u32,

    /// First hour after the night window (exclusive)
    #[serde(default = "default_night_end_hour")]
    pub night_end_hour: u32,

    /// Share of the connector trip price charged as Anfahrt
    #[serde(default = "default_anfahrt_fee_percentage")]
    pub anfahrt_fee_percentage: f64,

    /// Multiplier applied to the sum of trip price and Anfahrt
    #[serde(default = "default_buffer_multiplier")]
    pub buffer_multiplier: f64,
}

const fn default_base_fee() -> f64 {
    4.10
}

const fn default_rate_per_km_day() -> f64 {
    2.60
}

const fn default_rate_per_km_night() -> f64 {
    2.80
}

const fn default_night_start_hour() -> u32 {
    22
}

const fn default_night_end_hour() -> u32 {
    6
}

const fn default_anfahrt_fee_percentage() -> f64 {
    0.40
}

const fn default_buffer_multiplier() -> f64 {
    1.10
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            base_fee: default_base_fee(),
            rate_per_km_day: default_rate_per_km_day(),
            rate_per_km_night: default_rate_per_km_night(),
            night_start_hour: default_night_start_hour(),
            night_end_hour: default_night_end_hour(),
            anfahrt_fee_percentage: default_anfahrt_fee_percentage(),
            buffer_multiplier: default_buffer_multiplier(),
        }
    }
}

impl Tariff {
    /// Select the tariff window for a pickup time
    #[must_use]
    pub fn window_for(&self, pickup: PickupTime) -> TariffWindow {
        let hour = pickup.hour();
        if hour >= self.night_start_hour || hour < self.night_end_hour {
            TariffWindow::Night
        } else {
            TariffWindow::Day
        }
    }

    /// Rate per kilometer for a window
    #[must_use]
    pub const fn rate_per_km(&self, window: TariffWindow) -> f64 {
        match window {
            TariffWindow::Day => self.rate_per_km_day,
            TariffWindow::Night => self.rate_per_km_night,
        }
    }

    /// Metered price of a trip: base fee plus distance at the window's rate
    #[must_use]
    pub fn trip_price(&self, distance_km: f64, window: TariffWindow) -> f64 {
        distance_km.mul_add(self.rate_per_km(window), self.base_fee)
    }

    /// Anfahrt surcharge for a connector trip of `connector_km`
    #[must_use]
    pub fn anfahrt_fee(&self, connector_km: f64, window: TariffWindow) -> f64 {
        self.trip_price(connector_km, window) * self.anfahrt_fee_percentage
    }

    /// Final quoted price with the buffer applied
    #[must_use]
    pub fn final_price(&self, main_price: f64, anfahrt_fee: f64) -> f64 {
        (main_price + anfahrt_fee) * self.buffer_multiplier
    }

    /// Validate the tariff
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTariff` for negative amounts or hours outside 0-23
    pub fn validate(&self) -> Result<(), DomainError> {
        let amounts = [
            ("base_fee", self.base_fee),
            ("rate_per_km_day", self.rate_per_km_day),
            ("rate_per_km_night", self.rate_per_km_night),
            ("anfahrt_fee_percentage", self.anfahrt_fee_percentage),
            ("buffer_multiplier", self.buffer_multiplier),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidTariff(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }

        if self.night_start_hour > 23 || self.night_end_hour > 23 {
            return Err(DomainError::InvalidTariff(
                "night hours must be between 0 and 23".to_string(),
            ));
        }

        Ok(())
    }
}
