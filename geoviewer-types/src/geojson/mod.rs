//! Extents of GeoJSON documents.
//!
//! ```
//! use geoviewer_types::geojson::{parse_geojson_str, GeoJsonExtent};
//!
//! let geojson = parse_geojson_str(
//!     r#"{"type": "LineString", "coordinates": [[-10.0, 5.0], [20.0, -5.0]]}"#,
//! ).unwrap();
//! let bounds = geojson.extent().unwrap();
//! assert_eq!(bounds.west(), -10.0);
//! assert_eq!(bounds.north(), 5.0);
//! ```

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Position, Value};

use crate::error::GeoViewerTypesError;
use crate::geo::LatLngBounds;

mod point;

pub use point::GeoJsonPoint;

/// GeoJSON objects that occupy a geographic extent.
pub trait GeoJsonExtent {
    /// Minimal bounds containing every position of the object.
    ///
    /// Fails if a position is invalid or if the object contains no positions at all.
    fn extent(&self) -> Result<LatLngBounds, GeoViewerTypesError> {
        let mut bounds = None;
        self.accumulate(&mut bounds)?;
        bounds.ok_or(GeoViewerTypesError::EmptyGeometry)
    }

    /// Extends `bounds` with every position of the object.
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError>;
}

impl GeoJsonExtent for Value {
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError> {
        match self {
            Value::Point(p) => add_position(p, bounds),
            Value::MultiPoint(points) | Value::LineString(points) => add_positions(points, bounds),
            Value::MultiLineString(lines) | Value::Polygon(lines) => lines
                .iter()
                .try_for_each(|line| add_positions(line, bounds)),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .try_for_each(|ring| add_positions(ring, bounds)),
            Value::GeometryCollection(geometries) => geometries
                .iter()
                .try_for_each(|geometry| geometry.accumulate(bounds)),
        }
    }
}

impl GeoJsonExtent for Geometry {
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError> {
        self.value.accumulate(bounds)
    }
}

impl GeoJsonExtent for Feature {
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError> {
        match &self.geometry {
            Some(geometry) => geometry.accumulate(bounds),
            None => Ok(()),
        }
    }
}

impl GeoJsonExtent for FeatureCollection {
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError> {
        self.features
            .iter()
            .try_for_each(|feature| feature.accumulate(bounds))
    }
}

impl GeoJsonExtent for GeoJson {
    fn accumulate(&self, bounds: &mut Option<LatLngBounds>) -> Result<(), GeoViewerTypesError> {
        match self {
            GeoJson::Geometry(geometry) => geometry.accumulate(bounds),
            GeoJson::Feature(feature) => feature.accumulate(bounds),
            GeoJson::FeatureCollection(collection) => collection.accumulate(bounds),
        }
    }
}

/// Parses a GeoJSON document from a JSON value.
pub fn parse_geojson_value(value: serde_json::Value) -> Result<GeoJson, GeoViewerTypesError> {
    GeoJson::from_json_value(value).map_err(|err| GeoViewerTypesError::Parse(err.to_string()))
}

/// Parses a GeoJSON document from its text representation.
pub fn parse_geojson_str(text: &str) -> Result<GeoJson, GeoViewerTypesError> {
    text.parse::<GeoJson>()
        .map_err(|err| GeoViewerTypesError::Parse(err.to_string()))
}

fn add_position(
    position: &Position,
    bounds: &mut Option<LatLngBounds>,
) -> Result<(), GeoViewerTypesError> {
    let point = GeoJsonPoint::try_from(position)?;
    *bounds = Some(match bounds {
        Some(b) => b.extend(&point),
        None => LatLngBounds::from_point(&point),
    });

    Ok(())
}

fn add_positions(
    positions: &[Position],
    bounds: &mut Option<LatLngBounds>,
) -> Result<(), GeoViewerTypesError> {
    positions.iter().try_for_each(|p| add_position(p, bounds))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn extent_of(value: serde_json::Value) -> Result<LatLngBounds, GeoViewerTypesError> {
        parse_geojson_value(value)?.extent()
    }

    #[test]
    fn polygon_extent() {
        let bounds = extent_of(json!({
            "type": "Polygon",
            "coordinates": [[[-122.6, 37.6], [-122.3, 37.6], [-122.3, 37.9], [-122.6, 37.9], [-122.6, 37.6]]]
        }))
        .unwrap();

        assert_eq!(bounds, LatLngBounds::from_pairs([37.6, -122.6], [37.9, -122.3]));
    }

    #[test]
    fn point_extent_is_degenerate() {
        let bounds = extent_of(json!({"type": "Point", "coordinates": [10.0, 20.0]})).unwrap();
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.south(), 20.0);
        assert_eq!(bounds.west(), 10.0);
    }

    #[test]
    fn multi_polygon_extent() {
        let bounds = extent_of(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[5.0, -3.0], [6.0, -3.0], [6.0, -2.0], [5.0, -3.0]]]
            ]
        }))
        .unwrap();

        assert_eq!(bounds, LatLngBounds::from_pairs([-3.0, 0.0], [1.0, 6.0]));
    }

    #[test]
    fn geometry_collection_extent() {
        let bounds = extent_of(json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [-50.0, 10.0]},
                {"type": "LineString", "coordinates": [[0.0, 0.0], [40.0, -20.0]]}
            ]
        }))
        .unwrap();

        assert_eq!(bounds, LatLngBounds::from_pairs([-20.0, -50.0], [10.0, 40.0]));
    }

    #[test]
    fn feature_collection_extent() {
        let bounds = extent_of(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}},
                {"type": "Feature", "properties": {}, "geometry": null},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [3.0, -4.0]}}
            ]
        }))
        .unwrap();

        assert_eq!(bounds, LatLngBounds::from_pairs([-4.0, 1.0], [2.0, 3.0]));
    }

    #[test]
    fn empty_geometry_has_no_extent() {
        let result = extent_of(json!({"type": "MultiPoint", "coordinates": []}));
        assert_matches!(result, Err(GeoViewerTypesError::EmptyGeometry));
    }

    #[test]
    fn short_position_is_rejected() {
        let result = extent_of(json!({"type": "MultiPoint", "coordinates": [[1.0, 2.0], [3.0]]}));
        assert_matches!(
            result,
            Err(GeoViewerTypesError::Conversion(_) | GeoViewerTypesError::Parse(_))
        );

        let position: Position = vec![3.0];
        assert_matches!(
            GeoJsonPoint::try_from(&position),
            Err(GeoViewerTypesError::Conversion(_))
        );
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert_matches!(
            parse_geojson_value(json!({"type": "Circle", "radius": 3})),
            Err(GeoViewerTypesError::Parse(_))
        );
        assert_matches!(
            parse_geojson_str("not json at all"),
            Err(GeoViewerTypesError::Parse(_))
        );
    }
}
