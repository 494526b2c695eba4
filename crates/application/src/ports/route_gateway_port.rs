//! Location and route gateway port
//!
//! Defines the interface for resolving free-text addresses and computing
//! driving routes. Adapters in the infrastructure layer implement this port
//! using a maps API.

use async_trait::async_trait;
use domain::{Coordinate, Route};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geocoding and driving-route lookups
///
/// `Ok(None)` means the provider answered but found nothing. `Err` is
/// reserved for transport, quota and decoding failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RouteGatewayPort: Send + Sync {
    /// Resolve a free-text address to a coordinate
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError>;

    /// Compute the driving route between two coordinates
    ///
    /// The returned route carries the full-resolution path geometry.
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<Option<Route>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn RouteGatewayPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RouteGatewayPort>();
    }

    #[tokio::test]
    async fn mock_geocode_not_found() {
        let mut mock = MockRouteGatewayPort::new();
        mock.expect_geocode().returning(|_| Ok(None));

        let result = mock.geocode("Nowhere 1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn mock_route_returns_distance() {
        let mut mock = MockRouteGatewayPort::new();
        mock.expect_route()
            .returning(|from, to| Ok(Some(Route::new(12.0, vec![*from, *to]))));

        let a = Coordinate::new(50.1475, 7.1685).unwrap();
        let b = Coordinate::new(50.3569, 7.5890).unwrap();
        let route = mock.route(&a, &b).await.unwrap().unwrap();
        assert!((route.distance_km - 12.0).abs() < f64::EPSILON);
        assert_eq!(route.geometry.len(), 2);
    }
}
