//! Planar and spherical geometry helpers
//!
//! Polygons are treated in lon/lat space (x = longitude, y = latitude),
//! which is adequate for zones a few kilometers across.

use crate::value_objects::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ray-casting point-in-polygon test
///
/// A horizontal ray is cast from `point` towards +x; each polygon edge whose
/// y-span straddles the point and whose intersection lies to the right of
/// the point toggles membership. The ring may be given open or closed: the
/// closing edge from the last to the first vertex is always considered, and a
/// repeated closing vertex only adds a zero-length edge.
///
/// Points lying exactly on an edge or vertex have no defined answer: they may
/// be reported inside or outside depending on edge orientation.
#[must_use]
pub fn point_in_polygon(point: &Coordinate, polygon: &[Coordinate]) -> bool {
    let (x, y) = (point.lon(), point.lat());
    let mut inside = false;

    let Some(last) = polygon.len().checked_sub(1) else {
        return false;
    };

    let mut j = last;
    for (i, vi) in polygon.iter().enumerate() {
        let vj = &polygon[j];
        let (xi, yi) = (vi.lon(), vi.lat());
        let (xj, yj) = (vj.lon(), vj.lat());

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Great-circle distance between two coordinates in kilometers
#[must_use]
pub fn haversine_distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lon = (b.lon() - a.lon()).to_radians();

    let h = (lat1.cos() * lat2.cos()).mul_add(
        (delta_lon / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    );
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
