//! Anfahrt resolver
//!
//! Finds the shortest driving connector between the home-service zone and
//! the trip endpoint nearer to it. Every zone vertex is tried concurrently;
//! lookups that fail are dropped so the surcharge degrades instead of
//! failing the quote.

use std::fmt;
use std::sync::Arc;

use domain::{Coordinate, ServiceZone};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::ports::RouteGatewayPort;

/// Which trip endpoint the connector route leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnfahrtTarget {
    /// Pickup location
    Start,
    /// Drop-off location
    End,
}

/// Shortest successful connector found by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Index of the zone vertex the connector starts at
    pub vertex_index: usize,
    /// Driving distance in kilometers
    pub distance_km: f64,
}

/// Resolves connector routes from the zone boundary
pub struct AnfahrtResolver {
    gateway: Arc<dyn RouteGatewayPort>,
    zone: Arc<ServiceZone>,
}

impl fmt::Debug for AnfahrtResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnfahrtResolver")
            .field("zone", &self.zone.name)
            .finish_non_exhaustive()
    }
}

impl AnfahrtResolver {
    /// Create a resolver for a zone
    pub fn new(gateway: Arc<dyn RouteGatewayPort>, zone: Arc<ServiceZone>) -> Self {
        Self { gateway, zone }
    }

    /// Pick the endpoint closer to the zone center
    ///
    /// Straight-line distance is used. On a tie the start wins.
    #[must_use]
    pub fn target_for(&self, start: &Coordinate, end: &Coordinate) -> AnfahrtTarget {
        let center = self.zone.center();
        if start.distance_km(&center) <= end.distance_km(&center) {
            AnfahrtTarget::Start
        } else {
            AnfahrtTarget::End
        }
    }

    /// Shortest driving connector from any zone vertex to `target`
    ///
    /// All vertex lookups run concurrently and are awaited together. Failed,
    /// empty and unusable results are discarded; the first vertex wins on
    /// equal distances. Returns `None` when no lookup succeeded.
    #[instrument(skip(self), fields(zone = %self.zone.name))]
    pub async fn shortest_connector(&self, target: &Coordinate) -> Option<Connector> {
        let vertices = self.zone.vertices();
        let lookups = vertices
            .iter()
            .map(|vertex| self.gateway.route(vertex, target));
        let results = join_all(lookups).await;

        let mut best: Option<Connector> = None;
        for (vertex_index, result) in results.into_iter().enumerate() {
            let distance_km = match result {
                Ok(Some(route)) if route.has_usable_distance() => route.distance_km,
                Ok(Some(route)) => {
                    warn!(
                        vertex_index,
                        distance_km = route.distance_km,
                        "Discarding unusable connector"
                    );
                    continue;
                }
                Ok(None) => {
                    debug!(vertex_index, "No connector route from vertex");
                    continue;
                }
                Err(e) => {
                    warn!(vertex_index, error = %e, "Connector lookup failed");
                    continue;
                }
            };

            if best.is_none_or(|b| distance_km < b.distance_km) {
                best = Some(Connector {
                    vertex_index,
                    distance_km,
                });
            }
        }

        debug!(
            lookups = vertices.len(),
            connector = ?best,
            "Connector resolution finished"
        );
        best
    }
}
