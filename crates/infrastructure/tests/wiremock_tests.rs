//! Integration tests for the Mapbox route adapter
//!
//! Drive the adapter, and the fare service on top of it, against a
//! wiremock stand-in for the Mapbox APIs.

use std::sync::Arc;

use application::{FareRequest, FareService, error::ApplicationError, ports::RouteGatewayPort};
use domain::{Coordinate, FareFailure, ServiceZone, Tariff};
use infrastructure::MapboxRouteAdapter;
use integration_mapbox::MapboxConfig;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter_for(server: &MockServer) -> MapboxRouteAdapter {
    let config = MapboxConfig {
        base_url: server.uri(),
        ..MapboxConfig::for_testing()
    };
    MapboxRouteAdapter::from_config(&config).unwrap()
}

fn feature_collection(lon: f64, lat: f64) -> String {
    format!(r#"{{"type": "FeatureCollection", "features": [{{"center": [{lon}, {lat}]}}]}}"#)
}

fn directions(distance_m: f64, path: &[[f64; 2]]) -> String {
    serde_json::json!({
        "code": "Ok",
        "routes": [{
            "distance": distance_m,
            "duration": 600.0,
            "geometry": {"type": "LineString", "coordinates": path}
        }]
    })
    .to_string()
}

async fn mount_geocode(server: &MockServer, query: &str, body: String) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/geocoding/v5/mapbox.places/{query}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn geocode_resolves_first_feature() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Cochem", feature_collection(7.1685, 50.1475)).await;

    let coordinate = adapter_for(&server).geocode("Cochem").await.unwrap();
    assert_eq!(coordinate, Some(Coordinate::new(50.1475, 7.1685).unwrap()));
}

#[tokio::test]
async fn geocode_without_features_is_none() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Atlantis", r#"{"features": []}"#.to_string()).await;

    assert_eq!(adapter_for(&server).geocode("Atlantis").await.unwrap(), None);
}

#[tokio::test]
async fn rate_limit_surfaces_as_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = adapter_for(&server).geocode("Cochem").await.unwrap_err();
    assert!(matches!(err, ApplicationError::RateLimited));
}

#[tokio::test]
async fn server_error_is_external_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let a = Coordinate::new(50.1475, 7.1685).unwrap();
    let err = adapter_for(&server).route(&a, &a).await.unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
}

#[tokio::test]
async fn no_route_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex("^/directions/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code": "NoRoute"}"#))
        .mount(&server)
        .await;

    let a = Coordinate::new(50.1475, 7.1685).unwrap();
    let b = Coordinate::new(50.3569, 7.589).unwrap();
    assert!(adapter_for(&server).route(&a, &b).await.unwrap().is_none());
}

#[tokio::test]
async fn fare_service_quotes_through_adapter() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Endertplatz", feature_collection(7.1685, 50.1475)).await;
    mount_geocode(&server, "Moselpromenade", feature_collection(7.16, 50.14)).await;
    Mock::given(method("GET"))
        .and(path_regex("^/directions/v5/mapbox/driving/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(directions(10_000.0, &[[7.1685, 50.1475], [7.16, 50.14]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = FareService::new(
        Arc::new(adapter_for(&server)),
        Arc::new(Tariff::default()),
        Arc::new(ServiceZone::cochem()),
    );
    let quote = service
        .compute_fare(&FareRequest::new("Endertplatz 1", "Moselpromenade", "12:00"))
        .await
        .unwrap();

    assert!((quote.price - 33.11).abs() < 1e-9);
    assert!((quote.distance_km - 10.0).abs() < 1e-9);
    assert!(!quote.has_anfahrt);
    assert_eq!(quote.geometry.len(), 2);
}

#[tokio::test]
async fn fare_service_reports_unknown_destination() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Endertplatz", feature_collection(7.1685, 50.1475)).await;
    mount_geocode(&server, "Atlantis", r#"{"features": []}"#.to_string()).await;

    let service = FareService::new(
        Arc::new(adapter_for(&server)),
        Arc::new(Tariff::default()),
        Arc::new(ServiceZone::cochem()),
    );
    let outcome = service
        .compute_fare(&FareRequest::new("Endertplatz 1", "Atlantis", "12:00"))
        .await;

    assert_eq!(outcome, Err(FareFailure::GeocodeFailedEnd));
}
