//! Minimal GeoJSON feature payload model.
//!
//! Just enough of RFC 7946 to carry a fetched layer's geometry and derive
//! its extent: feature collections, features, and the common geometry
//! types. Styling, rendering, and anything property-driven is the map
//! engine's concern, so `properties` are not modelled and unknown fields
//! are ignored.
//!
//! GeoJSON positions are `[longitude, latitude]` - note the inversion
//! relative to [`LatLng`].

use serde::Deserialize;

use crate::geo::{GeoBounds, LatLng};

/// A GeoJSON position: `[lon, lat]`.
pub type Position = [f64; 2];

/// Geometry of a single feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position.
    Point {
        /// The position.
        coordinates: Position,
    },
    /// Multiple unconnected positions.
    MultiPoint {
        /// The positions.
        coordinates: Vec<Position>,
    },
    /// A connected line.
    LineString {
        /// Line vertices.
        coordinates: Vec<Position>,
    },
    /// Multiple lines.
    MultiLineString {
        /// Vertices per line.
        coordinates: Vec<Vec<Position>>,
    },
    /// A polygon: outer ring plus optional holes.
    Polygon {
        /// Rings, each a list of vertices.
        coordinates: Vec<Vec<Position>>,
    },
    /// Multiple polygons.
    MultiPolygon {
        /// Rings per polygon.
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

impl Geometry {
    /// Visit every constituent position as a [`LatLng`].
    fn for_each_position<F: FnMut(LatLng)>(&self, f: &mut F) {
        // GeoJSON order is [lon, lat].
        let to_lat_lng = |p: &Position| LatLng::new(p[1], p[0]);

        match self {
            Geometry::Point { coordinates } => f(to_lat_lng(coordinates)),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                for p in coordinates {
                    f(to_lat_lng(p));
                }
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                for p in coordinates.iter().flatten() {
                    f(to_lat_lng(p));
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for p in coordinates.iter().flatten().flatten() {
                    f(to_lat_lng(p));
                }
            }
        }
    }
}

/// One GeoJSON feature. Only the geometry is retained.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    /// Feature geometry; GeoJSON allows `null` here.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FeatureCollection {
    /// Member features, possibly empty.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a collection from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Minimum bounding box of every position in the collection.
    ///
    /// `None` when the collection holds no positions at all - the
    /// "invalid box" case that makes a dependent fit step skip.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut bounds: Option<GeoBounds> = None;
        for feature in &self.features {
            if let Some(geometry) = &feature.geometry {
                geometry.for_each_position(&mut |p| match &mut bounds {
                    Some(b) => b.expand(p),
                    None => bounds = Some(GeoBounds::from_point(p)),
                });
            }
        }
        bounds
    }

    /// Number of features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITY_BOUNDARY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "jacarei" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-46.05, -23.35],
                        [-45.90, -23.35],
                        [-45.90, -23.25],
                        [-46.05, -23.25],
                        [-46.05, -23.35]
                    ]]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_polygon_collection() {
        let collection = FeatureCollection::from_json(CITY_BOUNDARY).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_bounds_swap_geojson_axis_order() {
        let collection = FeatureCollection::from_json(CITY_BOUNDARY).unwrap();
        let bounds = collection.bounds().unwrap();

        // Positions were [lon, lat]; bounds are lat/lon.
        assert_eq!(bounds.min_lat, -23.35);
        assert_eq!(bounds.max_lat, -23.25);
        assert_eq!(bounds.min_lon, -46.05);
        assert_eq!(bounds.max_lon, -45.90);
    }

    #[test]
    fn test_empty_collection_has_no_bounds() {
        let collection = FeatureCollection::from_json(r#"{ "features": [] }"#).unwrap();
        assert!(collection.bounds().is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_null_geometry_contributes_nothing() {
        let collection = FeatureCollection::from_json(
            r#"{ "features": [ { "geometry": null } ] }"#,
        )
        .unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.bounds().is_none());
    }

    #[test]
    fn test_bounds_across_mixed_geometries() {
        let collection = FeatureCollection::from_json(
            r#"{
                "features": [
                    { "geometry": { "type": "Point", "coordinates": [10.0, 1.0] } },
                    { "geometry": { "type": "LineString", "coordinates": [[-5.0, -2.0], [0.0, 4.0]] } }
                ]
            }"#,
        )
        .unwrap();

        let bounds = collection.bounds().unwrap();
        assert_eq!(bounds.min_lat, -2.0);
        assert_eq!(bounds.max_lat, 4.0);
        assert_eq!(bounds.min_lon, -5.0);
        assert_eq!(bounds.max_lon, 10.0);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(FeatureCollection::from_json("not json").is_err());
        assert!(FeatureCollection::from_json(r#"{ "features": [ { "geometry": { "type": "Blob" } } ] }"#).is_err());
    }
}
