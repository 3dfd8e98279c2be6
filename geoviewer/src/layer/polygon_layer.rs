//! Layer drawing a single polygon, used to preview resource bounds.

use std::any::Any;

use geoviewer_types::geo::{GeoPoint2d, LatLngBounds};

use super::Layer;
use crate::attribution::Attribution;
use crate::view::MapView;

/// Single polygon outline given by its vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonLayer {
    vertices: Vec<GeoPoint2d>,
    opacity: f32,
}

impl PolygonLayer {
    /// Creates a polygon from its vertices. The ring is closed implicitly.
    pub fn new(vertices: Vec<GeoPoint2d>) -> Self {
        Self {
            vertices,
            opacity: 1.0,
        }
    }

    /// Creates a four-vertex polygon from the corners of the bounds, in `SW, SE, NE, NW` order.
    pub fn from_bounds(bounds: &LatLngBounds) -> Self {
        Self::new(bounds.corners().to_vec())
    }

    /// Vertices of the polygon.
    pub fn vertices(&self) -> &[GeoPoint2d] {
        &self.vertices
    }
}

impl Layer for PolygonLayer {
    fn requests(&self, _view: &MapView, _dpi_scale_factor: f32) -> Vec<String> {
        vec![]
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn attribution(&self) -> Option<Attribution> {
        None
    }
}
