//! Named coordinate configuration for landmark and airport distance features.
//!
//! Coordinate sets are plain serde-friendly values injected into the feature
//! functions, never hidden module globals, so a deployment for another city
//! can supply its own set without code change. The `nyc_*` constructors are
//! the defaults used by the NYC taxi dataset.

use crate::geometry::LatLon;
use serde::{Deserialize, Serialize};

/// A named point of interest used for distance features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub coord: LatLon,
}

impl Landmark {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            coord: LatLon::new(lat, lon),
        }
    }

    /// Column-name fragment derived from the display name: spaces replaced
    /// with underscores, lower-cased.
    pub fn column_slug(&self) -> String {
        self.name.replace(' ', "_").to_lowercase()
    }
}

/// An ordered set of landmarks. Order determines column emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    pub landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// The five fixed NYC points of interest.
    pub fn nyc_top_places() -> Self {
        Self::new(vec![
            Landmark::new("Statue of Liberty", 40.6892, -74.0445),
            Landmark::new("Central Park", 40.7851, -73.9683),
            Landmark::new("Empire State Building", 40.748817, -73.985428),
            Landmark::new("MoMA", 40.761436, -73.977621),
            Landmark::new("Times Square", 40.7580, -73.9855),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// Fixed reference coordinates for the trip featurizer: city center plus
/// three airports. Distances to these are degree-space magnitudes, not
/// physical distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoints {
    pub center: LatLon,
    pub jfk: LatLon,
    pub lga: LatLon,
    pub newark: LatLon,
}

impl ReferencePoints {
    /// NYC defaults: Manhattan center, JFK, LaGuardia, Newark Liberty.
    pub fn nyc() -> Self {
        Self {
            center: LatLon::new(40.724944, -74.001541),
            jfk: LatLon::new(40.645494, -73.785937),
            lga: LatLon::new(40.774071, -73.872067),
            newark: LatLon::new(40.690764, -74.177721),
        }
    }

    /// Points in column emission order, paired with their column-name suffix.
    pub fn named(&self) -> [(&'static str, LatLon); 4] {
        [
            ("center", self.center),
            ("jfk", self.jfk),
            ("lga", self.lga),
            ("nla", self.newark),
        ]
    }
}
