//! Local-planar distance approximations over WGS84 coordinates.
//!
//! These are the short-range approximations used for trip-level features:
//! latitude degrees are converted to meters with a fixed scale and longitude
//! degrees are compressed by the cosine of the mean latitude of the two
//! endpoints. Valid only where Earth curvature is negligible (city scale).
//! None of this is general-purpose geodesy; there is deliberately no
//! haversine or ellipsoidal path here.

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude, treated as constant everywhere.
pub const LAT_DEGREE_METERS: f64 = 111_320.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Latitude and longitude deltas from `a` to `b`, in meters on the local
/// planar approximation. Longitude is scaled by the cosine of the mean
/// latitude of the two endpoints.
pub fn local_planar_deltas_m(a: LatLon, b: LatLon) -> (f64, f64) {
    let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let dlat_m = (b.lat - a.lat) * LAT_DEGREE_METERS;
    let dlon_m = (b.lon - a.lon) * LAT_DEGREE_METERS * mean_lat.cos();
    (dlat_m, dlon_m)
}

/// Straight-line distance in meters on the local planar approximation.
pub fn euclidean_approx_m(a: LatLon, b: LatLon) -> f64 {
    let (dlat_m, dlon_m) = local_planar_deltas_m(a, b);
    dlat_m.hypot(dlon_m)
}

/// Block-wise distance in meters: sum of the absolute latitude and longitude
/// deltas on the local planar approximation. Dominates [`euclidean_approx_m`]
/// for the same endpoints, with equality when one axis delta is zero.
pub fn manhattan_approx_m(a: LatLon, b: LatLon) -> f64 {
    let (dlat_m, dlon_m) = local_planar_deltas_m(a, b);
    dlat_m.abs() + dlon_m.abs()
}

/// Euclidean distance in raw degree units, with no meter conversion and no
/// curvature correction. A relative-magnitude feature only; must not be
/// confused with the km-denominated distance columns.
pub fn degree_distance(a: LatLon, b: LatLon) -> f64 {
    ((a.lat - b.lat).powi(2) + (a.lon - b.lon).powi(2)).sqrt()
}

/// Round to two decimal places, matching the precision of every exported
/// distance column.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
