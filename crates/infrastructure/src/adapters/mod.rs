//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod mapbox_route_adapter;

pub use mapbox_route_adapter::MapboxRouteAdapter;
