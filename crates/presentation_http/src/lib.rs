//! Taxi fare HTTP presentation layer
//!
//! This crate provides the HTTP API for fare quoting.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{OriginCheckLayer, SecurityHeadersLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use server::{ShutdownOutcome, serve_until};
pub use state::AppState;
