//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoViewerTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The geometry does not contain a single position, so it has no extent.
    #[error("geometry has no positions")]
    EmptyGeometry,
    /// The input is not a valid GeoJSON document.
    #[error("failed to parse GeoJSON: {0}")]
    Parse(String),
}
