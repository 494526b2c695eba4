//! Application services - Use case implementations

mod anfahrt_resolver;
mod fare_service;
mod message_catalog;

pub use anfahrt_resolver::{AnfahrtResolver, AnfahrtTarget, Connector};
pub use fare_service::{FareRequest, FareService};
pub use message_catalog::MessageCatalog;
