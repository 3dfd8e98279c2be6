use geoviewer_types::cartesian::{Point2d, Rect};
use geoviewer_types::geo::{GeoPoint2d, LatLngBounds, WebMercator};
use serde::{Deserialize, Serialize};

use crate::tile_schema::TileSchema;

const DEFAULT_SIZE: Size = Size::new(800, 600);

/// Size of the map viewport in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        DEFAULT_SIZE
    }
}

/// Currently displayed part of the map: a center point, a z-level of the standard Web Mercator
/// tile schema and the size of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: GeoPoint2d,
    z_level: u32,
    size: Size,
    tile_schema: TileSchema,
}

impl MapView {
    /// Creates a view centered at the given point.
    pub fn new(center: GeoPoint2d, z_level: u32, size: Size) -> Self {
        Self {
            center,
            z_level,
            size,
            tile_schema: TileSchema::web(18),
        }
    }

    /// Creates a view of the given size that shows the whole `bounds` at the deepest possible
    /// z-level.
    pub fn fit_bounds(bounds: &LatLngBounds, size: Size) -> Self {
        let tile_schema = TileSchema::web(18);
        let projection = WebMercator::default();

        let projected = projection
            .project(&bounds.south_west())
            .zip(projection.project(&bounds.north_east()))
            .map(|(sw, ne)| Rect::from_corners(sw, ne));

        let Some(projected) = projected else {
            return Self::new(bounds.center(), 0, size);
        };

        let resolution = (projected.width() / f64::from(size.width().max(1)))
            .max(projected.height() / f64::from(size.height().max(1)));
        let z_level = tile_schema
            .select_lod(resolution)
            .map(|lod| lod.z_index())
            .unwrap_or_default();
        let center = projection
            .unproject(&projected.center())
            .unwrap_or_else(|| bounds.center());

        Self {
            center,
            z_level,
            size,
            tile_schema,
        }
    }

    /// Geographic center of the view.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Z-level of the view.
    pub fn z_level(&self) -> u32 {
        self.z_level
    }

    /// Size of the viewport.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resolution of the view in meters per pixel.
    pub fn resolution(&self) -> f64 {
        self.tile_schema
            .lod_resolution(self.z_level)
            .unwrap_or_default()
    }

    /// Returns a copy of the view with a different viewport size.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Projected extent of the view.
    pub fn get_bbox(&self) -> Option<Rect> {
        let center: Point2d = WebMercator::default().project(&self.center)?;
        let resolution = self.resolution();
        let half_width = f64::from(self.size.width()) * resolution / 2.0;
        let half_height = f64::from(self.size.height()) * resolution / 2.0;

        Some(Rect::new(
            center.x() - half_width,
            center.y() - half_height,
            center.x() + half_width,
            center.y() + half_height,
        ))
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(GeoPoint2d::default(), 0, Size::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geoviewer_types::geo::GeoPoint;
    use geoviewer_types::latlon;

    use super::*;

    #[test]
    fn fit_default_bounds() {
        let bounds = LatLngBounds::from_pairs([-30.0, -100.0], [30.0, 100.0]);
        let view = MapView::fit_bounds(&bounds, Size::new(800, 600));

        assert_relative_eq!(view.center().lat(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(view.center().lon(), 0.0, epsilon = 1e-9);
        // 200 degrees of longitude need ~27830 m/px on an 800 px wide viewport.
        assert_eq!(view.z_level(), 2);
    }

    #[test]
    fn fitted_view_contains_bounds() {
        let bounds = LatLngBounds::new(latlon!(37.6, -122.6), latlon!(37.9, -122.3));
        let view = MapView::fit_bounds(&bounds, Size::new(512, 512));
        let bbox = view.get_bbox().unwrap();

        let projection = WebMercator::default();
        for corner in bounds.corners() {
            assert!(bbox.contains(&projection.project(&corner).unwrap()));
        }
        assert_eq!(view.z_level(), 10);
    }

    #[test]
    fn degenerate_bounds_use_deepest_level() {
        let bounds = LatLngBounds::from_point(&latlon!(10.0, 10.0));
        let view = MapView::fit_bounds(&bounds, Size::default());

        assert_eq!(view.z_level(), 17);
        assert_relative_eq!(view.center().lat(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn with_size_keeps_position() {
        let view = MapView::new(latlon!(1.0, 2.0), 5, Size::new(100, 100));
        let resized = view.with_size(Size::new(300, 200));

        assert_eq!(resized.center(), view.center());
        assert_eq!(resized.z_level(), 5);
        assert_eq!(resized.size(), Size::new(300, 200));
    }
}
