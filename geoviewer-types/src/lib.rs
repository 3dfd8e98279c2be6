//! Geometry primitives used by the `geoviewer` crate: geographic points and bounds, Web Mercator
//! projection and extraction of extents from GeoJSON documents.

pub mod cartesian;
pub mod error;
pub mod geo;
pub mod geojson;

pub use geo::{GeoPoint, GeoPoint2d, LatLngBounds, NewGeoPoint};
