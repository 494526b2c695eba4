//! Home-service zone
//!
//! Trips that start, end or pass through the zone carry no Anfahrt. The
//! polygon is stored as a closed ring; the center point is only used to
//! decide which trip endpoint is closer to the zone.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;
use crate::geo;
use crate::value_objects::Coordinate;

/// The fixed polygon around the operator's base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceZone {
    /// Display name of the zone
    #[serde(default = "default_zone_name")]
    pub name: String,

    /// Boundary as `[lon, lat]` pairs, closed (first == last)
    #[serde(
        default = "cochem_polygon",
        serialize_with = "serialize_lon_lat",
        deserialize_with = "deserialize_lon_lat"
    )]
    polygon: Vec<Coordinate>,

    /// Reference point for proximity comparisons
    #[serde(default = "cochem_center")]
    center: Coordinate,
}

fn default_zone_name() -> String {
    "Cochem".to_string()
}

/// Cochem no-fee zone as `[lon, lat]` pairs
const COCHEM_RING: [[f64; 2]; 10] = [
    [7.1580, 50.1590],
    [7.1750, 50.1550],
    [7.1850, 50.1450],
    [7.1820, 50.1320],
    [7.1668, 50.1175],
    [7.1400, 50.1200],
    [7.1250, 50.1300],
    [7.1320, 50.1420],
    [7.1400, 50.1480],
    [7.1580, 50.1590],
];

fn cochem_polygon() -> Vec<Coordinate> {
    COCHEM_RING
        .iter()
        .map(|[lon, lat]| Coordinate::new_unchecked(*lat, *lon))
        .collect()
}

/// Pater-Martin-Straße, Cochem
const fn cochem_center() -> Coordinate {
    Coordinate::new_unchecked(50.1475, 7.1685)
}

impl Default for ServiceZone {
    fn default() -> Self {
        Self::cochem()
    }
}

impl ServiceZone {
    /// Build a zone from a boundary ring and center
    ///
    /// An open ring is closed by repeating its first vertex.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZone` if the ring has fewer than three
    /// distinct vertices
    pub fn new(
        name: impl Into<String>,
        mut polygon: Vec<Coordinate>,
        center: Coordinate,
    ) -> Result<Self, DomainError> {
        if let (Some(first), Some(last)) = (polygon.first().copied(), polygon.last().copied()) {
            if first != last {
                polygon.push(first);
            }
        }

        let zone = Self {
            name: name.into(),
            polygon,
            center,
        };
        zone.validate()?;
        Ok(zone)
    }

    /// The Cochem home-service zone
    #[must_use]
    pub fn cochem() -> Self {
        Self {
            name: default_zone_name(),
            polygon: cochem_polygon(),
            center: cochem_center(),
        }
    }

    /// Closed boundary ring
    #[must_use]
    pub fn polygon(&self) -> &[Coordinate] {
        &self.polygon
    }

    /// Zone center
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Boundary vertices without the repeated closing vertex
    #[must_use]
    pub fn vertices(&self) -> &[Coordinate] {
        match self.polygon.as_slice() {
            [first, .., last] if first == last => &self.polygon[..self.polygon.len() - 1],
            ring => ring,
        }
    }

    /// Whether a point lies inside the zone (boundary points undefined)
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        geo::point_in_polygon(point, &self.polygon)
    }

    /// Whether any vertex of a route geometry lies inside the zone
    ///
    /// Only the geometry's vertices are sampled. A route that cuts across a
    /// corner of the zone between two vertices that are both outside is
    /// reported as not intersecting.
    #[must_use]
    pub fn route_intersects(&self, geometry: &[Coordinate]) -> bool {
        geometry.iter().any(|point| self.contains(point))
    }

    /// Validate the zone
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZone` if the ring has fewer than three
    /// distinct vertices or is not closed
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.polygon.first() != self.polygon.last() {
            return Err(DomainError::InvalidZone(
                "polygon ring must be closed".to_string(),
            ));
        }

        let vertices = self.vertices();
        let mut distinct: Vec<&Coordinate> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }

        if distinct.len() < 3 {
            return Err(DomainError::InvalidZone(
                "polygon needs at least 3 distinct vertices".to_string(),
            ));
        }

        Ok(())
    }
}

fn serialize_lon_lat<S>(polygon: &[Coordinate], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let pairs: Vec<[f64; 2]> = polygon.iter().map(Coordinate::to_lon_lat).collect();
    pairs.serialize(serializer)
}

fn deserialize_lon_lat<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs: Vec<[f64; 2]> = Vec::deserialize(deserializer)?;
    pairs
        .into_iter()
        .map(|pair| Coordinate::from_lon_lat(pair).map_err(serde::de::Error::custom))
        .collect()
}
