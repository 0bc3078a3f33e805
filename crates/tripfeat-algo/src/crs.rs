//! Planar projection of WGS84 coordinates.
//!
//! Thin wrapper over proj4rs that pairs a source and target CRS and surfaces
//! every failure as [`FeatureError::Projection`]. The trip feature functions
//! only ever project EPSG:4326 into EPSG:2263 (the New York / Long Island
//! state-plane system), but the projector accepts arbitrary proj strings so
//! other deployments can substitute their local planar CRS.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use rayon::prelude::*;
use tripfeat_core::{FeatureError, FeatureResult, LatLon};

/// Geographic WGS84 (EPSG:4326).
pub const EPSG_4326: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// NAD83 / New York Long Island (EPSG:2263). Planar units are US survey feet.
pub const EPSG_2263: &str = "+proj=lcc +lat_1=41.03333333333333 \
    +lat_2=40.66666666666666 +lat_0=40.16666666666666 +lon_0=-74 \
    +x_0=300000.0000000001 +y_0=0 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 \
    +units=us-ft +no_defs";

/// Projects geographic coordinates into a planar CRS.
pub struct PlaneProjector {
    source: Proj,
    target: Proj,
}

impl PlaneProjector {
    pub fn from_proj_strings(source: &str, target: &str) -> FeatureResult<Self> {
        let source = Proj::from_proj_string(source).map_err(projection_error)?;
        let target = Proj::from_proj_string(target).map_err(projection_error)?;
        Ok(Self { source, target })
    }

    /// EPSG:4326 -> EPSG:2263, the projection used by every `*_geo_km` and
    /// landmark distance column.
    pub fn nyc_long_island() -> FeatureResult<Self> {
        Self::from_proj_strings(EPSG_4326, EPSG_2263)
    }

    /// Project one coordinate; returns planar (x, y) in the target CRS units.
    pub fn project(&self, coord: LatLon) -> FeatureResult<(f64, f64)> {
        let mut point = (coord.lon.to_radians(), coord.lat.to_radians(), 0.0);
        transform(&self.source, &self.target, &mut point).map_err(projection_error)?;
        Ok((point.0, point.1))
    }

    /// Project a batch of coordinates. Rows are independent, so batches are
    /// projected in parallel; output order matches input order.
    pub fn project_all(&self, coords: &[LatLon]) -> FeatureResult<Vec<(f64, f64)>> {
        coords.par_iter().map(|coord| self.project(*coord)).collect()
    }
}

/// Euclidean distance between two projected points, in the planar CRS units.
pub fn planar_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn projection_error(err: proj4rs::errors::Error) -> FeatureError {
    FeatureError::Projection(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_project_identically() {
        let projector = PlaneProjector::nyc_long_island().unwrap();
        let coord = LatLon::new(40.7128, -74.0060);
        let a = projector.project(coord).unwrap();
        let b = projector.project(coord).unwrap();
        assert_eq!(a, b);
        assert_eq!(planar_distance(a, b), 0.0);
    }

    #[test]
    fn test_project_all_preserves_order() {
        let projector = PlaneProjector::nyc_long_island().unwrap();
        let coords = vec![
            LatLon::new(40.7128, -74.0060),
            LatLon::new(40.7580, -73.9855),
            LatLon::new(40.6892, -74.0445),
        ];
        let batch = projector.project_all(&coords).unwrap();
        assert_eq!(batch.len(), 3);
        for (coord, planar) in coords.iter().zip(&batch) {
            assert_eq!(projector.project(*coord).unwrap(), *planar);
        }
    }

    #[test]
    fn test_malformed_proj_string_is_projection_error() {
        let err = PlaneProjector::from_proj_strings("+proj=nonsense", EPSG_2263)
            .err()
            .expect("malformed proj string must fail");
        assert!(matches!(err, FeatureError::Projection(_)));
    }

    #[test]
    fn test_planar_distance() {
        assert_eq!(planar_distance((0.0, 0.0), (3.0, 4.0)), 5.0);
    }
}
