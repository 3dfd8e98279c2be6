//! [`TileSchema`] is used by tile layers to calculate [tile indices](TileIndex) needed for a given
//! [`MapView`](crate::MapView) and the projected extent of every tile.

use std::collections::BTreeSet;

use geoviewer_types::cartesian::{Point2d, Rect};
use serde::{Deserialize, Serialize};

use crate::lod::Lod;

const WEB_HALF_EXTENT: f64 = 20037508.342787;
const WEB_TOP_RESOLUTION: f64 = 156543.03392800014;

/// Direction of the Y index of tiles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum VerticalDirection {
    /// Tiles with `Y == 0` are at the top of the map (XYZ addressing).
    TopToBottom,
    /// Tiles with `Y == 0` are at the bottom of the map (TMS addressing).
    BottomToTop,
}

/// Tile index.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(x: i32, y: i32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Tile schema specifies how tile indices are calculated based on the map position and resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileSchema {
    /// Position where all tiles have `X == 0, Y == 0` indices.
    pub origin: Point2d,
    /// Rectangle that contains all tiles of the tile scheme.
    pub bounds: Rect,
    /// Sorted set of levels of detail that specify resolutions for each z-level.
    pub lods: BTreeSet<Lod>,
    /// Width of a single tile in pixels.
    pub tile_width: u32,
    /// Height of a single tile in pixels.
    pub tile_height: u32,
    /// Direction of the Y-axis.
    pub y_direction: VerticalDirection,
}

impl TileSchema {
    /// Standard Web Mercator based tile scheme (used, for example, by OSM and Google maps).
    pub fn web(lods_count: u32) -> Self {
        let lods = (0..lods_count)
            .filter_map(|z| Lod::new(WEB_TOP_RESOLUTION / 2f64.powi(z as i32), z))
            .collect();

        TileSchema {
            origin: Point2d::new(-WEB_HALF_EXTENT, WEB_HALF_EXTENT),
            bounds: Rect::new(
                -WEB_HALF_EXTENT,
                -WEB_HALF_EXTENT,
                WEB_HALF_EXTENT,
                WEB_HALF_EXTENT,
            ),
            lods,
            tile_width: 256,
            tile_height: 256,
            y_direction: VerticalDirection::TopToBottom,
        }
    }

    /// Web Mercator scheme with TMS row numbering: rows are counted from the bottom of the map.
    pub fn web_tms(lods_count: u32) -> Self {
        Self {
            origin: Point2d::new(-WEB_HALF_EXTENT, -WEB_HALF_EXTENT),
            y_direction: VerticalDirection::BottomToTop,
            ..Self::web(lods_count)
        }
    }

    /// Resolution of the given z-level, if exists.
    pub fn lod_resolution(&self, z: u32) -> Option<f64> {
        self.lods
            .iter()
            .find(|lod| lod.z_index() == z)
            .map(|lod| lod.resolution())
    }

    /// Highest z-level of the schema.
    pub fn max_z(&self) -> Option<u32> {
        self.lods.iter().next_back().map(|lod| lod.z_index())
    }

    /// Deepest z-level whose resolution is not finer than `resolution`, so that an extent
    /// requiring `resolution` map units per pixel fits into the viewport. Falls back to the
    /// coarsest level.
    pub fn select_lod(&self, resolution: f64) -> Option<Lod> {
        if !resolution.is_finite() {
            return None;
        }

        let mut selected = *self.lods.iter().next()?;
        for lod in &self.lods {
            if lod.resolution() < resolution {
                break;
            }
            selected = *lod;
        }

        Some(selected)
    }

    /// Projected extent of the tile.
    pub fn tile_bbox(&self, index: TileIndex) -> Option<Rect> {
        let resolution = self.lod_resolution(index.z)?;
        let tile_w = resolution * f64::from(self.tile_width);
        let tile_h = resolution * f64::from(self.tile_height);

        let x_min = self.origin.x() + f64::from(index.x) * tile_w;
        let (y_min, y_max) = match self.y_direction {
            VerticalDirection::TopToBottom => {
                let y_max = self.origin.y() - f64::from(index.y) * tile_h;
                (y_max - tile_h, y_max)
            }
            VerticalDirection::BottomToTop => {
                let y_min = self.origin.y() + f64::from(index.y) * tile_h;
                (y_min, y_min + tile_h)
            }
        };

        Some(Rect::new(x_min, y_min, x_min + tile_w, y_max))
    }

    /// Iterate over tile indices of level `z` that intersect the given projected extent.
    pub fn iter_tiles_over_bbox(
        &self,
        z: u32,
        bounding_box: Rect,
    ) -> Option<impl Iterator<Item = TileIndex>> {
        let resolution = self.lod_resolution(z)?;
        let tile_w = resolution * f64::from(self.tile_width);
        let tile_h = resolution * f64::from(self.tile_height);
        let max_index = self.max_index(resolution);

        let x_min = (self.x_adj(bounding_box.x_min()) / tile_w).floor() as i32;
        let x_max = (self.x_adj(bounding_box.x_max()) / tile_w).ceil() as i32 - 1;

        let (first, last) = match self.y_direction {
            VerticalDirection::TopToBottom => (bounding_box.y_max(), bounding_box.y_min()),
            VerticalDirection::BottomToTop => (bounding_box.y_min(), bounding_box.y_max()),
        };
        let y_min = (self.y_adj(first) / tile_h).floor() as i32;
        let y_max = (self.y_adj(last) / tile_h).ceil() as i32 - 1;

        let x_range = x_min.max(0)..=x_max.min(max_index);
        let y_range = y_min.max(0)..=y_max.min(max_index);

        Some(x_range.flat_map(move |x| y_range.clone().map(move |y| TileIndex::new(x, y, z))))
    }

    fn max_index(&self, resolution: f64) -> i32 {
        (self.bounds.width() / (resolution * f64::from(self.tile_width))).round() as i32 - 1
    }

    fn x_adj(&self, x: f64) -> f64 {
        x - self.origin.x()
    }

    fn y_adj(&self, y: f64) -> f64 {
        match self.y_direction {
            VerticalDirection::TopToBottom => self.origin.y() - y,
            VerticalDirection::BottomToTop => y - self.origin.y(),
        }
    }
}
