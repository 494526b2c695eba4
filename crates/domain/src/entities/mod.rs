//! Domain entities

mod fare;
mod route;
mod service_zone;

pub use fare::{FareFailure, FareOutcome, FareQuote};
pub use route::Route;
pub use service_zone::ServiceZone;
