use serde::{Deserialize, Serialize};

use super::point::{GeoPoint, GeoPoint2d, NewGeoPoint};

/// Rectangle in geographic coordinates given by its south-west and north-east corners.
///
/// The constructors keep `south <= north` and `west <= east`, so a value of this type is always a
/// valid (possibly degenerate) rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    south_west: GeoPoint2d,
    north_east: GeoPoint2d,
}

impl LatLngBounds {
    /// Creates bounds from two opposite corners. Corners are reordered if needed.
    ///
    /// ```
    /// use geoviewer_types::geo::{GeoPoint, LatLngBounds};
    /// use geoviewer_types::latlon;
    ///
    /// let bounds = LatLngBounds::new(latlon!(30.0, 100.0), latlon!(-30.0, -100.0));
    /// assert_eq!(bounds.south(), -30.0);
    /// assert_eq!(bounds.east(), 100.0);
    /// ```
    pub fn new(a: impl GeoPoint<Num = f64>, b: impl GeoPoint<Num = f64>) -> Self {
        Self {
            south_west: GeoPoint2d::latlon(a.lat().min(b.lat()), a.lon().min(b.lon())),
            north_east: GeoPoint2d::latlon(a.lat().max(b.lat()), a.lon().max(b.lon())),
        }
    }

    /// Creates bounds from `[[south, west], [north, east]]` pairs.
    pub fn from_pairs(south_west: [f64; 2], north_east: [f64; 2]) -> Self {
        Self::new(
            GeoPoint2d::latlon(south_west[0], south_west[1]),
            GeoPoint2d::latlon(north_east[0], north_east[1]),
        )
    }

    /// Bounds of a single point.
    pub fn from_point(point: &impl GeoPoint<Num = f64>) -> Self {
        let point = GeoPoint2d::from(point);
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Minimal bounds containing all the given points. Returns `None` if the iterator is empty.
    pub fn from_points<P: GeoPoint<Num = f64>>(
        mut points: impl Iterator<Item = P>,
    ) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_point(&first), |bounds, p| bounds.extend(&p)))
    }

    /// Returns bounds that also contain the given point.
    pub fn extend(&self, point: &impl GeoPoint<Num = f64>) -> Self {
        self.merge(Self::from_point(point))
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            south_west: GeoPoint2d::latlon(
                self.south().min(other.south()),
                self.west().min(other.west()),
            ),
            north_east: GeoPoint2d::latlon(
                self.north().max(other.north()),
                self.east().max(other.east()),
            ),
        }
    }

    /// Southern latitude of the bounds.
    pub fn south(&self) -> f64 {
        self.south_west.lat()
    }

    /// Western longitude of the bounds.
    pub fn west(&self) -> f64 {
        self.south_west.lon()
    }

    /// Northern latitude of the bounds.
    pub fn north(&self) -> f64 {
        self.north_east.lat()
    }

    /// Eastern longitude of the bounds.
    pub fn east(&self) -> f64 {
        self.north_east.lon()
    }

    /// South-west corner.
    pub fn south_west(&self) -> GeoPoint2d {
        self.south_west
    }

    /// South-east corner.
    pub fn south_east(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.south(), self.east())
    }

    /// North-east corner.
    pub fn north_east(&self) -> GeoPoint2d {
        self.north_east
    }

    /// North-west corner.
    pub fn north_west(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.north(), self.west())
    }

    /// Corners of the bounds in `SW, SE, NE, NW` order.
    pub fn corners(&self) -> [GeoPoint2d; 4] {
        [
            self.south_west(),
            self.south_east(),
            self.north_east(),
            self.north_west(),
        ]
    }

    /// Geographic center of the rectangle.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    /// Returns true if the rectangle has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.south() == self.north() || self.west() == self.east()
    }

    /// Returns true if the point lies inside the bounds or on their border.
    pub fn contains(&self, point: &impl GeoPoint<Num = f64>) -> bool {
        self.south() <= point.lat()
            && self.north() >= point.lat()
            && self.west() <= point.lon()
            && self.east() >= point.lon()
    }
}
