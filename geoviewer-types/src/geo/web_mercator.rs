use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::datum::Datum;
use super::point::{GeoPoint, NewGeoPoint};
use crate::cartesian::Point2d;

/// Maximum latitude that can be represented in Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical Web Mercator projection (EPSG:3857).
#[derive(Debug, Copy, Clone, Default)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a projection on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    /// Half of the projected world width in meters.
    pub fn half_extent(&self) -> f64 {
        self.datum.semimajor() * std::f64::consts::PI
    }

    /// Projects the geographic point to the plane. Latitudes beyond the projection range are
    /// clamped to [`MAX_LATITUDE`].
    pub fn project(&self, point: &impl GeoPoint<Num = f64>) -> Option<Point2d> {
        let lat = point.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.datum.semimajor() * point.lon_rad();
        let y = self.datum.semimajor() * (FRAC_PI_4 + lat / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    /// Converts a projected point back to geographic coordinates.
    pub fn unproject<P: NewGeoPoint<f64>>(&self, point: &Point2d) -> Option<P> {
        let lat = FRAC_PI_2 - 2.0 * (-point.y() / self.datum.semimajor()).exp().atan();
        let lon = point.x() / self.datum.semimajor();

        if lat.is_finite() && lon.is_finite() {
            Some(P::latlon(lat.to_degrees(), lon.to_degrees()))
        } else {
            None
        }
    }
}
