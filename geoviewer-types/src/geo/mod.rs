//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and their
//! projection to the Web Mercator plane (see [`WebMercator`]).

mod bounds;
mod datum;
mod point;
mod web_mercator;

pub use bounds::LatLngBounds;
pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use web_mercator::WebMercator;
