//! # tripfeat-algo: Trip Feature Engineering over Polars
//!
//! Derives geometric and temporal model-input features from taxi trip records
//! (pickup/dropoff WGS84 coordinates and timestamps) held in an in-memory
//! polars `DataFrame`. Two overlapping, independent feature surfaces:
//!
//! - [`geo_features`] - stateless free functions, each taking the table and
//!   returning it with derived columns: projected-CRS trip distance,
//!   planar Euclidean and Manhattan approximations, per-landmark distances,
//!   time-of-day and season labels.
//! - [`trip_features`] - [`TripFeaturizer`], a featurizer bound to one table
//!   and a fixed coordinate set, writing degree-space distances, calendar
//!   integer columns, airport distances, and coordinate differences in a
//!   fixed sequence.
//!
//! ## Derived columns
//!
//! | Column | Source | Units |
//! |--------|--------|-------|
//! | `distance_geo_km` | [`geo_features::add_distance_feature`] | EPSG:2263 planar / 1000, 2 dp |
//! | `evklid_distance_km` | [`geo_features::add_euclidean_distance_feature`] | km (local planar), 2 dp |
//! | `manhattan_distance_km` | [`geo_features::add_manhattan_distance_feature`] | km (local planar), 2 dp |
//! | `distance_to_<slug>_from_{pickup,dropoff}_km` | [`geo_features::add_distances_to_top_places`] | EPSG:2263 planar / 1000, 2 dp |
//! | `time_of_day`, `season` | [`geo_features`] calendar functions | categorical label |
//! | `distance`, `pickup_distance_to_*`, `dropoff_distance_to_*`, `abs_long_diff`, `abs_lat_diff` | [`trip_features`] | raw degrees |
//! | `hour`, `day`, `month`, `year` | [`trip_features`] | integers |
//!
//! Every derived value is row-independent; failures surface immediately as
//! [`tripfeat_core::FeatureError`] and leave the table partially mutated
//! (columns written before the failure remain).

mod columns;
pub mod crs;
pub mod geo_features;
pub mod trip_features;

pub use crs::{PlaneProjector, EPSG_2263, EPSG_4326};
pub use geo_features::{
    add_distance_feature, add_distances_to_top_places, add_euclidean_distance_feature,
    add_manhattan_distance_feature, add_season_feature, add_time_of_day_feature,
};
pub use trip_features::{TripFeatureSummary, TripFeaturizer, PICKUP_DATETIME_FORMAT};
