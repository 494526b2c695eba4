//! Domain layer for the taxi fare service
//!
//! Contains the pricing vocabulary (coordinates, tariffs, the home-service
//! zone, quotes and failure reasons) together with the pure geometry the
//! pricing engine relies on. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
