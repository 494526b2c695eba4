//! Taxi fare CLI
//!
//! Command-line interface for quoting fares and checking a running server.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::{FareRequest, FareService, MessageCatalog};
use clap::{Parser, Subcommand};
use domain::{Coordinate, FareOutcome};
use infrastructure::{AppConfig, LogFormat, MapboxRouteAdapter, TelemetryConfig, init_telemetry};
use presentation_http::handlers::fare::FareResponse;
use tracing::debug;

/// Taxi fare CLI
#[derive(Debug, Parser)]
#[command(name = "fare-cli")]
#[command(author, version, about = "Taxi fare quoting CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Quote a fare in-process using the configured Mapbox account
    ///
    /// Example: fare-cli quote --from "Endertplatz 1, Cochem" --to "Ulmen" --time 22:30
    Quote {
        /// Pickup address
        #[arg(long)]
        from: String,

        /// Drop-off address
        #[arg(long)]
        to: String,

        /// Pickup time (HH:MM)
        #[arg(long)]
        time: String,

        /// Pickup latitude, skips geocoding together with --start-lon
        #[arg(long, requires = "start_lon", allow_negative_numbers = true)]
        start_lat: Option<f64>,

        /// Pickup longitude
        #[arg(long, requires = "start_lat", allow_negative_numbers = true)]
        start_lon: Option<f64>,

        /// Drop-off latitude, skips geocoding together with --end-lon
        #[arg(long, requires = "end_lon", allow_negative_numbers = true)]
        end_lat: Option<f64>,

        /// Drop-off longitude
        #[arg(long, requires = "end_lat", allow_negative_numbers = true)]
        end_lon: Option<f64>,

        /// Configuration file (default: optional ./config.toml)
        #[arg(short, long, env = "TAXIFARE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the HTTP response body instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check server health (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Build a coordinate from optional CLI halves
fn coordinate_arg(
    lat: Option<f64>,
    lon: Option<f64>,
    which: &str,
) -> anyhow::Result<Option<Coordinate>> {
    lat.zip(lon)
        .map(|(lat, lon)| Coordinate::new(lat, lon).with_context(|| format!("invalid {which} coordinate")))
        .transpose()
}

/// One-line summary of an outcome
fn summarize(outcome: &FareOutcome, catalog: &MessageCatalog) -> String {
    match outcome {
        Ok(quote) => {
            let mut line = format!(
                "{:.2} EUR for {:.2} km ({} tariff)",
                quote.price, quote.distance_km, quote.tariff_window
            );
            if let Some(fee) = quote.anfahrt_fee {
                line.push_str(&format!(", includes Anfahrt {fee:.2} EUR"));
            } else if quote.has_anfahrt {
                line.push_str(", Anfahrt applies but could not be priced");
            }
            line
        },
        Err(failure) => catalog.message_for(*failure),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        log_format: LogFormat::Text,
    })?;

    match cli.command {
        Commands::Quote {
            from,
            to,
            time,
            start_lat,
            start_lon,
            end_lat,
            end_lon,
            config,
            json,
        } => {
            let config = AppConfig::load_from(config.as_deref())?;
            config.validate()?;
            debug!(zone = %config.zone.name, "Configuration loaded");

            let gateway = MapboxRouteAdapter::from_config(&config.mapbox)
                .map_err(|e| anyhow::anyhow!("Failed to initialize route gateway: {e}"))?;
            let service = FareService::new(
                Arc::new(gateway),
                Arc::new(config.tariff),
                Arc::new(config.zone),
            );

            let request = FareRequest::new(from, to, time).with_coordinates(
                coordinate_arg(start_lat, start_lon, "start")?,
                coordinate_arg(end_lat, end_lon, "end")?,
            );
            let outcome = service.compute_fare(&request).await;
            let catalog = MessageCatalog::english();

            if json {
                let response = FareResponse::from_outcome(outcome.clone(), &catalog);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else if outcome.is_ok() {
                println!("🚕 {}", summarize(&outcome, &catalog));
            } else {
                println!("❌ {}", summarize(&outcome, &catalog));
            }

            if outcome.is_err() {
                std::process::exit(1);
            }
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/health")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
