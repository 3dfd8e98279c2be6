//! Geographic extent of the resource shown by the viewer.

use geoviewer_types::geo::LatLngBounds;
use geoviewer_types::geojson::{parse_geojson_str, parse_geojson_value, GeoJsonExtent};
use serde_json::Value;

use crate::error::ViewerError;

/// South-west corner of the bounds used when the resource geometry is unknown.
pub const DEFAULT_SOUTH_WEST: [f64; 2] = [-30.0, -100.0];
/// North-east corner of the bounds used when the resource geometry is unknown.
pub const DEFAULT_NORTH_EAST: [f64; 2] = [30.0, 100.0];

/// World-scale bounds used when the resource geometry is unknown.
pub fn default_bounds() -> LatLngBounds {
    LatLngBounds::from_pairs(DEFAULT_SOUTH_WEST, DEFAULT_NORTH_EAST)
}

/// Computes the bounds of a resource from its GeoJSON geometry.
#[derive(Debug, Default, Copy, Clone)]
pub struct BoundsCalculator;

impl BoundsCalculator {
    /// Returns the minimal rectangle enclosing all positions of the geometry, or the
    /// [default bounds](default_bounds) if there is no geometry.
    ///
    /// The geometry can be a GeoJSON object or a string containing one. JSON `null` is treated as
    /// no geometry.
    pub fn compute(&self, geometry: Option<&Value>) -> Result<LatLngBounds, ViewerError> {
        let geojson = match geometry {
            None | Some(Value::Null) => return Ok(default_bounds()),
            Some(Value::String(text)) => parse_geojson_str(text)?,
            Some(value) => parse_geojson_value(value.clone())?,
        };

        Ok(geojson.extent()?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn no_geometry_gives_default_bounds() {
        let bounds = BoundsCalculator.compute(None).unwrap();
        assert_eq!(bounds.south(), -30.0);
        assert_eq!(bounds.west(), -100.0);
        assert_eq!(bounds.north(), 30.0);
        assert_eq!(bounds.east(), 100.0);

        assert_eq!(BoundsCalculator.compute(Some(&Value::Null)).unwrap(), bounds);
    }

    #[test]
    fn polygon_extent() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[
                [-122.5, 37.7], [-122.3, 37.7], [-122.3, 37.9], [-122.5, 37.9], [-122.5, 37.7]
            ]]
        });

        let bounds = BoundsCalculator.compute(Some(&geometry)).unwrap();
        assert_relative_eq!(bounds.south(), 37.7);
        assert_relative_eq!(bounds.west(), -122.5);
        assert_relative_eq!(bounds.north(), 37.9);
        assert_relative_eq!(bounds.east(), -122.3);
    }

    #[test]
    fn geometry_as_string() {
        let geometry = Value::String(
            r#"{"type": "MultiPoint", "coordinates": [[1.0, 2.0], [-3.0, 4.0]]}"#.to_string(),
        );

        let bounds = BoundsCalculator.compute(Some(&geometry)).unwrap();
        assert_eq!(bounds, LatLngBounds::from_pairs([2.0, -3.0], [4.0, 1.0]));
    }

    #[test]
    fn compute_is_idempotent() {
        let geometry = json!({"type": "LineString", "coordinates": [[0.0, 0.0], [5.0, 5.0]]});
        assert_eq!(
            BoundsCalculator.compute(Some(&geometry)).unwrap(),
            BoundsCalculator.compute(Some(&geometry)).unwrap()
        );
    }

    #[test]
    fn malformed_geometry() {
        assert_matches!(
            BoundsCalculator.compute(Some(&json!({"type": "Polygon"}))),
            Err(ViewerError::GeometryParse(_))
        );
        assert_matches!(
            BoundsCalculator.compute(Some(&Value::String("ENVELOPE(1,2,3,4)".into()))),
            Err(ViewerError::GeometryParse(_))
        );
        assert_matches!(
            BoundsCalculator.compute(Some(&json!({"type": "MultiPoint", "coordinates": []}))),
            Err(ViewerError::GeometryParse(_))
        );
    }
}
