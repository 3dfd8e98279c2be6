//! Points and rectangles on a projected (flat) plane.

mod rect;

pub use rect::Rect;

use serde::{Deserialize, Serialize};

/// Point on a projected plane, in the units of the projection (meters for Web Mercator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Point2d {
    x: f64,
    y: f64,
}

impl Point2d {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}
