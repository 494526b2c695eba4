//! Logging infrastructure
//!
//! Sets up the global `tracing` subscriber with an environment-aware filter
//! and either human-readable or JSON output.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
