//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod route_gateway_port;

#[cfg(test)]
pub use route_gateway_port::MockRouteGatewayPort;
pub use route_gateway_port::RouteGatewayPort;
