//! Geographic primitives shared across the crate.
//!
//! Provides [`LatLng`] points, [`GeoBounds`] bounding rectangles, and the
//! [`Padding`] applied when fitting the camera to a bounding box. Bounds
//! carry a validity predicate: a box derived from zero points does not
//! exist ([`GeoBounds::from_positions`] returns `None`) and a box with
//! non-finite or inverted coordinates reports [`GeoBounds::is_valid`] as
//! false. Only valid boxes may drive a camera fit.

use serde::{Deserialize, Serialize};

/// A geographic point in WGS84 degrees.
///
/// Serialized as a `[lat, lon]` pair, matching the order used by step-list
/// documents (e.g. `"center": [-23.3, -45.9]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct LatLng {
    /// Latitude in degrees (positive = north).
    pub lat: f64,
    /// Longitude in degrees (positive = east).
    pub lon: f64,
}

impl LatLng {
    /// Create a new geographic point.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLng> for (f64, f64) {
    fn from(p: LatLng) -> Self {
        (p.lat, p.lon)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Geographic bounding box (south-west / north-east rectangle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Minimum (southernmost) latitude
    pub min_lat: f64,
    /// Maximum (northernmost) latitude
    pub max_lat: f64,
    /// Minimum (westernmost) longitude
    pub min_lon: f64,
    /// Maximum (easternmost) longitude
    pub max_lon: f64,
}

impl GeoBounds {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Create a bounding box from a single point.
    pub fn from_point(p: LatLng) -> Self {
        Self {
            min_lat: p.lat,
            max_lat: p.lat,
            min_lon: p.lon,
            max_lon: p.lon,
        }
    }

    /// Compute the minimum bounding box of a set of points.
    ///
    /// Returns `None` for an empty set: a box with no constituent points
    /// does not exist. This is the "bounds unavailable" signal consumers
    /// use to skip camera fits against not-yet-loaded layers.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Expand this bounding box to include a point.
    pub fn expand(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lon = self.min_lon.min(p.lon);
        self.max_lon = self.max_lon.max(p.lon);
    }

    /// Whether this box can drive a camera fit.
    ///
    /// Handles are foreign capability objects, so bounds received through
    /// the layer registry are re-checked here: all coordinates finite and
    /// minimums not exceeding maximums.
    pub fn is_valid(&self) -> bool {
        self.min_lat.is_finite()
            && self.max_lat.is_finite()
            && self.min_lon.is_finite()
            && self.max_lon.is_finite()
            && self.min_lat <= self.max_lat
            && self.min_lon <= self.max_lon
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// South-west corner.
    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.min_lat, self.min_lon)
    }

    /// North-east corner.
    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.max_lat, self.max_lon)
    }

    /// Width of the bounds in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounds in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Whether the box contains a point (inclusive).
    pub fn contains(&self, p: LatLng) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lon..=self.max_lon).contains(&p.lon)
    }
}

/// Pixel padding applied around bounds when fitting the camera.
///
/// Serialized as an `[x, y]` pair (e.g. `"padding": [24, 24]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Padding {
    /// Horizontal padding in pixels.
    pub x: f64,
    /// Vertical padding in pixels.
    pub y: f64,
}

impl Padding {
    /// Create a new padding value.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self { x: 16.0, y: 16.0 }
    }
}

impl From<(f64, f64)> for Padding {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Padding> for (f64, f64) {
    fn from(p: Padding) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_positions_empty_is_none() {
        assert!(GeoBounds::from_positions(std::iter::empty()).is_none());
    }

    #[test]
    fn test_from_positions_single_point() {
        let bounds = GeoBounds::from_positions([LatLng::new(-23.3, -45.9)]).unwrap();
        assert_eq!(bounds.min_lat, -23.3);
        assert_eq!(bounds.max_lat, -23.3);
        assert_eq!(bounds.min_lon, -45.9);
        assert_eq!(bounds.max_lon, -45.9);
        assert!(bounds.is_valid());
    }

    #[test]
    fn test_expand_grows_in_all_directions() {
        let mut bounds = GeoBounds::from_point(LatLng::new(0.0, 0.0));
        bounds.expand(LatLng::new(2.0, -3.0));
        bounds.expand(LatLng::new(-1.0, 4.0));
        assert_eq!(bounds.min_lat, -1.0);
        assert_eq!(bounds.max_lat, 2.0);
        assert_eq!(bounds.min_lon, -3.0);
        assert_eq!(bounds.max_lon, 4.0);
    }

    #[test]
    fn test_center() {
        let bounds = GeoBounds::new(-10.0, 10.0, 20.0, 40.0);
        let center = bounds.center();
        assert_eq!(center.lat, 0.0);
        assert_eq!(center.lon, 30.0);
    }

    #[test]
    fn test_invalid_when_inverted() {
        let bounds = GeoBounds::new(10.0, -10.0, 0.0, 1.0);
        assert!(!bounds.is_valid());
    }

    #[test]
    fn test_invalid_when_nan() {
        let bounds = GeoBounds::new(f64::NAN, 1.0, 0.0, 1.0);
        assert!(!bounds.is_valid());
    }

    #[test]
    fn test_latlng_json_pair_order() {
        let p: LatLng = serde_json::from_str("[-23.3, -45.9]").unwrap();
        assert_eq!(p.lat, -23.3);
        assert_eq!(p.lon, -45.9);
    }

    #[test]
    fn test_padding_default() {
        let padding = Padding::default();
        assert_eq!(padding.x, 16.0);
        assert_eq!(padding.y, 16.0);
    }

    #[test]
    fn test_padding_json_pair() {
        let padding: Padding = serde_json::from_str("[24, 24]").unwrap();
        assert_eq!(padding, Padding::new(24.0, 24.0));
    }

    proptest! {
        #[test]
        fn prop_from_positions_contains_all_points(
            points in prop::collection::vec((-85.0f64..85.0, -180.0f64..180.0), 1..32)
        ) {
            let points: Vec<LatLng> = points.into_iter().map(|(lat, lon)| LatLng::new(lat, lon)).collect();
            let bounds = GeoBounds::from_positions(points.iter().copied()).unwrap();
            prop_assert!(bounds.is_valid());
            for p in points {
                prop_assert!(bounds.contains(p));
            }
        }

        #[test]
        fn prop_expand_is_monotonic(
            lat1 in -85.0f64..85.0, lon1 in -180.0f64..180.0,
            lat2 in -85.0f64..85.0, lon2 in -180.0f64..180.0,
        ) {
            let mut bounds = GeoBounds::from_point(LatLng::new(lat1, lon1));
            bounds.expand(LatLng::new(lat2, lon2));
            prop_assert!(bounds.contains(LatLng::new(lat1, lon1)));
            prop_assert!(bounds.contains(LatLng::new(lat2, lon2)));
            prop_assert!(bounds.width() >= 0.0);
            prop_assert!(bounds.height() >= 0.0);
        }
    }
}
