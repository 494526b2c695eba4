//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod pickup_time;
mod tariff;

pub use coordinate::Coordinate;
pub use pickup_time::PickupTime;
pub use tariff::{Tariff, TariffWindow};
