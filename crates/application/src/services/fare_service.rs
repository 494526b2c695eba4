//! Fare quoting service
//!
//! Resolves both trip endpoints, requests the main driving route, decides
//! whether the trip owes an Anfahrt surcharge and prices the result. Main
//! trip failures abort the quote; Anfahrt failures only reduce the fee.

use std::fmt;
use std::sync::Arc;

use domain::{
    Coordinate, FareFailure, FareOutcome, FareQuote, PickupTime, Route, ServiceZone, Tariff,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::anfahrt_resolver::{AnfahrtResolver, AnfahrtTarget};
use crate::ports::RouteGatewayPort;

/// Input for a single fare computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FareRequest {
    /// Free-text pickup address
    pub start_address: String,
    /// Free-text drop-off address
    pub end_address: String,
    /// Pickup time as `HH:MM`
    pub pickup_time: String,
    /// Pre-resolved pickup coordinate, skips geocoding when present
    #[serde(default)]
    pub start_coordinate: Option<Coordinate>,
    /// Pre-resolved drop-off coordinate, skips geocoding when present
    #[serde(default)]
    pub end_coordinate: Option<Coordinate>,
}

impl FareRequest {
    /// Create a request from addresses only
    pub fn new(
        start_address: impl Into<String>,
        end_address: impl Into<String>,
        pickup_time: impl Into<String>,
    ) -> Self {
        Self {
            start_address: start_address.into(),
            end_address: end_address.into(),
            pickup_time: pickup_time.into(),
            start_coordinate: None,
            end_coordinate: None,
        }
    }

    /// Attach pre-resolved coordinates
    #[must_use]
    pub const fn with_coordinates(
        mut self,
        start: Option<Coordinate>,
        end: Option<Coordinate>,
    ) -> Self {
        self.start_coordinate = start;
        self.end_coordinate = end;
        self
    }

    fn has_required_fields(&self) -> bool {
        !self.start_address.trim().is_empty()
            && !self.end_address.trim().is_empty()
            && !self.pickup_time.trim().is_empty()
    }
}

/// Service for quoting taxi fares
pub struct FareService {
    gateway: Arc<dyn RouteGatewayPort>,
    tariff: Arc<Tariff>,
    zone: Arc<ServiceZone>,
    anfahrt: AnfahrtResolver,
}

impl fmt::Debug for FareService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FareService")
            .field("tariff", &self.tariff)
            .field("zone", &self.zone.name)
            .finish_non_exhaustive()
    }
}

impl FareService {
    /// Create a new fare service
    pub fn new(
        gateway: Arc<dyn RouteGatewayPort>,
        tariff: Arc<Tariff>,
        zone: Arc<ServiceZone>,
    ) -> Self {
        let anfahrt = AnfahrtResolver::new(Arc::clone(&gateway), Arc::clone(&zone));
        Self {
            gateway,
            tariff,
            zone,
            anfahrt,
        }
    }

    /// Tariff used for pricing
    #[must_use]
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Home-service zone
    #[must_use]
    pub fn zone(&self) -> &ServiceZone {
        &self.zone
    }

    /// Compute a fare quote
    ///
    /// Always returns exactly one of a quote or a failure reason.
    #[instrument(skip(self, request), fields(pickup_time = %request.pickup_time))]
    pub async fn compute_fare(&self, request: &FareRequest) -> FareOutcome {
        if !request.has_required_fields() {
            debug!("Rejecting request with missing input");
            return Err(FareFailure::MissingInput);
        }

        let pickup = PickupTime::parse(&request.pickup_time).map_err(|e| {
            warn!(error = %e, "Unparseable pickup time");
            FareFailure::Generic
        })?;

        let start = self
            .resolve(&request.start_address, request.start_coordinate)
            .await;
        let end = self
            .resolve(&request.end_address, request.end_coordinate)
            .await;
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let failure = FareFailure::from_geocoding(start.is_some(), end.is_some())
                    .unwrap_or(FareFailure::Generic);
                return Err(failure);
            }
        };

        let route = self.main_route(&start, &end).await?;
        let window = self.tariff.window_for(pickup);
        let main_price = self.tariff.trip_price(route.distance_km, window);

        let has_anfahrt = self.requires_anfahrt(&start, &end, &route);
        let mut fee = 0.0;
        if has_anfahrt {
            let target = match self.anfahrt.target_for(&start, &end) {
                AnfahrtTarget::Start => start,
                AnfahrtTarget::End => end,
            };
            match self.anfahrt.shortest_connector(&target).await {
                Some(connector) => fee = self.tariff.anfahrt_fee(connector.distance_km, window),
                None => warn!("No connector route found, quoting without Anfahrt fee"),
            }
        }

        let price = self.tariff.final_price(main_price, fee);
        info!(
            price,
            distance_km = route.distance_km,
            %window,
            has_anfahrt,
            anfahrt_fee = fee,
            "Fare quoted"
        );

        Ok(FareQuote {
            price,
            distance_km: route.distance_km,
            geometry: route.geometry,
            tariff_window: window,
            has_anfahrt,
            anfahrt_fee: (fee > 0.0).then_some(fee),
        })
    }

    /// Whether a trip lies entirely outside the zone
    ///
    /// Start, end and every vertex of the route geometry must be outside.
    #[must_use]
    pub fn requires_anfahrt(&self, start: &Coordinate, end: &Coordinate, route: &Route) -> bool {
        !self.zone.contains(start)
            && !self.zone.contains(end)
            && !self.zone.route_intersects(&route.geometry)
    }

    async fn resolve(&self, address: &str, preset: Option<Coordinate>) -> Option<Coordinate> {
        if let Some(coordinate) = preset {
            debug!(%coordinate, "Using pre-resolved coordinate");
            return Some(coordinate);
        }

        match self.gateway.geocode(address).await {
            Ok(Some(coordinate)) => Some(coordinate),
            Ok(None) => {
                warn!(address, "Address not found");
                None
            }
            Err(e) => {
                warn!(address, error = %e, "Geocoding failed");
                None
            }
        }
    }

    async fn main_route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route, FareFailure> {
        let route = match self.gateway.route(start, end).await {
            Ok(Some(route)) => route,
            Ok(None) => {
                warn!(%start, %end, "No route between endpoints");
                return Err(FareFailure::RoutingFailed);
            }
            Err(e) => {
                warn!(%start, %end, error = %e, "Routing failed");
                return Err(FareFailure::RoutingFailed);
            }
        };

        if !route.has_usable_distance() {
            warn!(distance_km = route.distance_km, "Gateway returned unusable distance");
            return Err(FareFailure::Generic);
        }

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use domain::TariffWindow;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::MockRouteGatewayPort;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn service(mock: MockRouteGatewayPort) -> FareService {
        FareService::new(
            Arc::new(mock),
            Arc::new(Tariff::default()),
            Arc::new(ServiceZone::cochem()),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Both inside the Cochem zone
    fn cochem_a() -> Coordinate {
        c(50.1475, 7.1685)
    }
    fn cochem_b() -> Coordinate {
        c(50.1400, 7.1600)
    }

    // Both outside, north-east of the zone
    fn outside_near() -> Coordinate {
        c(50.20, 7.25)
    }
    fn outside_far() -> Coordinate {
        c(50.30, 7.40)
    }

    fn geocode_table(mock: &mut MockRouteGatewayPort, start: Coordinate, end: Coordinate) {
        mock.expect_geocode().returning(move |address| match address {
            "Start" => Ok(Some(start)),
            "End" => Ok(Some(end)),
            _ => Ok(None),
        });
    }

    #[tokio::test]
    async fn missing_input_aborts_before_gateway() {
        let mock = MockRouteGatewayPort::new();
        let svc = service(mock);

        for request in [
            FareRequest::new("", "End", "12:00"),
            FareRequest::new("Start", "  ", "12:00"),
            FareRequest::new("Start", "End", ""),
        ] {
            assert_eq!(svc.compute_fare(&request).await, Err(FareFailure::MissingInput));
        }
    }

    #[tokio::test]
    async fn unparseable_time_is_generic() {
        let svc = service(MockRouteGatewayPort::new());
        let outcome = svc
            .compute_fare(&FareRequest::new("Start", "End", "25:99"))
            .await;
        assert_eq!(outcome, Err(FareFailure::Generic));
    }

    #[tokio::test]
    async fn day_trip_inside_zone_has_no_anfahrt() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_b());
        mock.expect_route()
            .times(1)
            .returning(|from, to| Ok(Some(Route::new(10.0, vec![*from, *to]))));

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();

        assert!(approx(quote.price, 33.11));
        assert!(approx(quote.distance_km, 10.0));
        assert_eq!(quote.tariff_window, TariffWindow::Day);
        assert!(!quote.has_anfahrt);
        assert_eq!(quote.anfahrt_fee, None);
    }

    #[tokio::test]
    async fn night_rate_applies_from_22() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_b());
        mock.expect_route()
            .returning(|from, to| Ok(Some(Route::new(10.0, vec![*from, *to]))));

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "22:00"))
            .await
            .unwrap();

        // (4.10 + 10 * 2.80) * 1.10
        assert!(approx(quote.price, 35.31));
        assert_eq!(quote.tariff_window, TariffWindow::Night);
    }

    #[tokio::test]
    async fn one_endpoint_inside_zone_has_no_anfahrt() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), outside_far());
        mock.expect_route()
            .times(1)
            .returning(|_, _| Ok(Some(Route::new(20.0, vec![]))));

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();
        assert!(!quote.has_anfahrt);
    }

    #[tokio::test]
    async fn route_through_zone_has_no_anfahrt() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, c(50.20, 7.10), c(50.10, 7.25));
        mock.expect_route()
            .times(1)
            .returning(|from, to| Ok(Some(Route::new(15.0, vec![*from, cochem_a(), *to]))));

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();
        assert!(!quote.has_anfahrt);
        assert_eq!(quote.anfahrt_fee, None);
    }

    #[tokio::test]
    async fn outside_trip_adds_shortest_connector_fee() {
        let start = outside_near();
        let end = outside_far();
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, start, end);
        mock.expect_route().returning(move |from, to| {
            if *from == start && *to == end {
                return Ok(Some(Route::new(10.0, vec![start, end])));
            }
            assert_eq!(*to, start, "connector must lead to the nearer endpoint");
            let vertex = ServiceZone::cochem()
                .vertices()
                .iter()
                .position(|v| v == from)
                .unwrap();
            if vertex == 3 {
                Ok(Some(Route::new(5.0, vec![])))
            } else {
                Err(ApplicationError::ExternalService("timeout".to_string()))
            }
        });

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();

        // fee = (4.10 + 5 * 2.60) * 0.40 = 6.84
        assert!(quote.has_anfahrt);
        assert!(approx(quote.anfahrt_fee.unwrap(), 6.84));
        assert!(approx(quote.price, (30.10 + 6.84) * 1.10));
    }

    #[tokio::test]
    async fn connector_failures_degrade_to_zero_fee() {
        let start = outside_near();
        let end = outside_far();
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, start, end);
        mock.expect_route().returning(move |from, _| {
            if *from == start {
                Ok(Some(Route::new(10.0, vec![start, end])))
            } else {
                Err(ApplicationError::RateLimited)
            }
        });

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();

        assert!(quote.has_anfahrt);
        assert_eq!(quote.anfahrt_fee, None);
        assert!(approx(quote.price, 33.11));
    }

    #[tokio::test]
    async fn geocoding_failures_select_key() {
        let cases = [
            ("Start", "Nowhere", FareFailure::GeocodeFailedEnd),
            ("Nowhere", "End", FareFailure::GeocodeFailedStart),
            ("Nowhere", "Nowhere", FareFailure::GeocodeFailedBoth),
        ];

        for (from, to, expected) in cases {
            let mut mock = MockRouteGatewayPort::new();
            geocode_table(&mut mock, cochem_a(), cochem_b());
            mock.expect_route().never();

            let outcome = service(mock)
                .compute_fare(&FareRequest::new(from, to, "12:00"))
                .await;
            assert_eq!(outcome, Err(expected));
        }
    }

    #[tokio::test]
    async fn geocoding_transport_error_counts_as_not_found() {
        let mut mock = MockRouteGatewayPort::new();
        mock.expect_geocode()
            .returning(|_| Err(ApplicationError::ExternalService("503".to_string())));

        let outcome = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await;
        assert_eq!(outcome, Err(FareFailure::GeocodeFailedBoth));
    }

    #[tokio::test]
    async fn preset_coordinates_skip_geocoding() {
        let mut mock = MockRouteGatewayPort::new();
        mock.expect_geocode().never();
        mock.expect_route()
            .returning(|from, to| Ok(Some(Route::new(10.0, vec![*from, *to]))));

        let request = FareRequest::new("Start", "End", "12:00")
            .with_coordinates(Some(cochem_a()), Some(cochem_b()));
        let quote = service(mock).compute_fare(&request).await.unwrap();
        assert!(approx(quote.price, 33.11));
    }

    #[tokio::test]
    async fn one_preset_coordinate_geocodes_the_other() {
        let mut mock = MockRouteGatewayPort::new();
        mock.expect_geocode()
            .withf(|address| address == "End")
            .times(1)
            .returning(|_| Ok(Some(cochem_b())));
        mock.expect_route()
            .returning(|from, to| Ok(Some(Route::new(10.0, vec![*from, *to]))));

        let request =
            FareRequest::new("Start", "End", "12:00").with_coordinates(Some(cochem_a()), None);
        assert!(service(mock).compute_fare(&request).await.is_ok());
    }

    #[tokio::test]
    async fn main_route_failure_is_routing_failed() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_b());
        mock.expect_route()
            .times(1)
            .returning(|_, _| Err(ApplicationError::ExternalService("down".to_string())));

        let outcome = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await;
        assert_eq!(outcome, Err(FareFailure::RoutingFailed));
    }

    #[tokio::test]
    async fn missing_main_route_is_routing_failed() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_b());
        mock.expect_route().returning(|_, _| Ok(None));

        let outcome = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await;
        assert_eq!(outcome, Err(FareFailure::RoutingFailed));
    }

    #[tokio::test]
    async fn non_finite_distance_is_generic() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_b());
        mock.expect_route()
            .returning(|_, _| Ok(Some(Route::new(f64::INFINITY, vec![]))));

        let outcome = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await;
        assert_eq!(outcome, Err(FareFailure::Generic));
    }

    #[tokio::test]
    async fn zero_distance_is_priced() {
        let mut mock = MockRouteGatewayPort::new();
        geocode_table(&mut mock, cochem_a(), cochem_a());
        mock.expect_route()
            .returning(|from, _| Ok(Some(Route::new(0.0, vec![*from]))));

        let quote = service(mock)
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();
        assert!(approx(quote.price, 4.10 * 1.10));
    }

    /// Gateway that counts overlapping geocode calls
    #[derive(Default)]
    struct OverlapGateway {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl RouteGatewayPort for OverlapGateway {
        async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Some(if address == "Start" { cochem_a() } else { cochem_b() }))
        }

        async fn route(
            &self,
            from: &Coordinate,
            to: &Coordinate,
        ) -> Result<Option<Route>, ApplicationError> {
            Ok(Some(Route::new(10.0, vec![*from, *to])))
        }
    }

    #[tokio::test]
    async fn endpoints_are_geocoded_one_at_a_time() {
        let gateway = Arc::new(OverlapGateway::default());
        let svc = FareService::new(
            gateway.clone(),
            Arc::new(Tariff::default()),
            Arc::new(ServiceZone::cochem()),
        );

        let quote = svc
            .compute_fare(&FareRequest::new("Start", "End", "12:00"))
            .await
            .unwrap();
        assert!(approx(quote.price, 33.11));
        assert_eq!(gateway.peak.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.in_flight.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_output() {
        let svc = service(MockRouteGatewayPort::new());
        let debug = format!("{svc:?}");
        assert!(debug.contains("FareService"));
        assert!(debug.contains("Cochem"));
    }
}
