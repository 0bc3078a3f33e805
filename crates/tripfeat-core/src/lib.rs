//! # tripfeat-core: Trip Feature Domain Core
//!
//! Dependency-light building blocks for taxi trip feature engineering:
//!
//! - [`error`] - the [`FeatureError`] taxonomy shared by every feature function
//! - [`geometry`] - local-planar distance approximations over WGS84 degrees
//! - [`calendar`] - time-of-day and season bucketing rules
//! - [`landmarks`] - injectable named-coordinate configuration (landmark sets,
//!   airport reference points)
//!
//! Everything here is a pure value or a pure function; the DataFrame-facing
//! feature functions live in `tripfeat-algo`.

pub mod calendar;
pub mod error;
pub mod geometry;
pub mod landmarks;

pub use calendar::{Season, TimeOfDay};
pub use error::{FeatureError, FeatureResult};
pub use geometry::LatLon;
pub use landmarks::{Landmark, LandmarkSet, ReferencePoints};
