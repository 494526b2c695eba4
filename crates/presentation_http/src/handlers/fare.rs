//! Fare calculation handler

use std::collections::HashMap;

use application::{FareRequest, MessageCatalog};
use axum::{Json, extract::State, http::StatusCode};
use domain::{Coordinate, FareOutcome};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{
    middleware::{ValidatedJson, ValidationError},
    state::AppState,
};

/// Longest accepted address
pub const MAX_ADDRESS_LEN: usize = 200;

/// Fare calculation request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_start_address"))]
    pub start_address: String,

    #[serde(default)]
    #[validate(custom(function = "validate_end_address"))]
    pub end_address: String,

    /// `HH:MM`, single-digit hour allowed
    #[serde(default)]
    #[validate(custom(function = "validate_pickup_time"))]
    pub pickup_time: String,

    #[serde(default, deserialize_with = "lenient_degrees")]
    pub start_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub start_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub end_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub end_lon: Option<f64>,

    /// Caller texts keyed by failure reason
    #[serde(default)]
    pub error_messages: Option<HashMap<String, String>>,
}

impl CalculateRequest {
    /// Convert into the engine request
    ///
    /// A coordinate pair is only used when both halves are present and in
    /// range; otherwise that endpoint is geocoded.
    pub fn to_fare_request(&self) -> FareRequest {
        let pair = |lat: Option<f64>, lon: Option<f64>| {
            lat.zip(lon)
                .and_then(|(lat, lon)| Coordinate::new(lat, lon).ok())
        };

        FareRequest::new(&self.start_address, &self.end_address, &self.pickup_time)
            .with_coordinates(
                pair(self.start_lat, self.start_lon),
                pair(self.end_lat, self.end_lon),
            )
    }

    /// Default catalog overlaid with the caller's texts
    pub fn catalog(&self, defaults: &MessageCatalog) -> MessageCatalog {
        match &self.error_messages {
            Some(messages) => defaults
                .clone()
                .merged_with(&MessageCatalog::new(messages.clone())),
            None => defaults.clone(),
        }
    }
}

fn address_rule(
    value: &str,
    required: &'static str,
    too_long: &'static str,
) -> Result<(), validator::ValidationError> {
    if value.is_empty() {
        return Err(validator::ValidationError::new("required").with_message(required.into()));
    }
    if value.chars().count() > MAX_ADDRESS_LEN {
        return Err(validator::ValidationError::new("length").with_message(too_long.into()));
    }
    Ok(())
}

fn validate_start_address(value: &str) -> Result<(), validator::ValidationError> {
    address_rule(value, "Start address is required", "Start address is too long")
}

fn validate_end_address(value: &str) -> Result<(), validator::ValidationError> {
    address_rule(value, "End address is required", "End address is too long")
}

/// `H:MM` or `HH:MM`, 00:00 through 23:59
fn validate_pickup_time(value: &str) -> Result<(), validator::ValidationError> {
    let well_formed = value.split_once(':').is_some_and(|(hour, minute)| {
        (1..=2).contains(&hour.len())
            && minute.len() == 2
            && hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
    }) && domain::PickupTime::parse(value).is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(validator::ValidationError::new("pickup_time")
            .with_message("Invalid time format (HH:MM)".into()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept degrees as a JSON number or a numeric string
///
/// Blank, unparseable and non-finite values become `None`.
fn lenient_degrees<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            NumberOrText::Number(n) => Some(n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        })
        .filter(|n: &f64| n.is_finite()))
}

/// GeoJSON `LineString`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    fn from_path(path: &[Coordinate]) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates: path.iter().map(Coordinate::to_lon_lat).collect(),
        }
    }
}

/// Fare calculation response
///
/// Exactly one of `price` and `message` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareResponse {
    pub price: Option<f64>,
    /// Trip distance in kilometers
    pub distance: Option<f64>,
    pub message: Option<String>,
    pub geometry: Option<LineString>,
    pub has_anfahrt: bool,
    pub anfahrt_fee: Option<f64>,
}

impl FareResponse {
    /// Failure body carrying only a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Render an engine outcome
    pub fn from_outcome(outcome: FareOutcome, catalog: &MessageCatalog) -> Self {
        match outcome {
            Ok(quote) => Self {
                price: Some(quote.price),
                distance: Some(quote.distance_km),
                message: None,
                geometry: Some(LineString::from_path(&quote.geometry)),
                has_anfahrt: quote.has_anfahrt,
                anfahrt_fee: quote.anfahrt_fee,
            },
            Err(failure) => Self::failure(catalog.message_for(failure)),
        }
    }
}

/// Quote a fare
///
/// Engine failures and field validation failures are answered with 200 and
/// a message. Bodies that cannot be read as JSON keep the status of the
/// rejection (400, 413 or 415).
#[instrument(skip_all)]
pub async fn calculate(
    State(state): State<AppState>,
    request: Result<ValidatedJson<CalculateRequest>, ValidationError>,
) -> (StatusCode, Json<FareResponse>) {
    let ValidatedJson(request) = match request {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected fare request");
            let status = match &e {
                ValidationError::ValidationFailed(_) => StatusCode::OK,
                ValidationError::JsonError(_) => e.status(),
            };
            let body = FareResponse::failure(e.messages().join(", "));
            return (status, Json(body));
        },
    };

    let catalog = request.catalog(&state.messages);
    let outcome = state
        .fare_service
        .compute_fare(&request.to_fare_request())
        .await;

    (StatusCode::OK, Json(FareResponse::from_outcome(outcome, &catalog)))
}
