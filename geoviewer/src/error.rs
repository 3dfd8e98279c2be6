//! Error types used by the crate.

use std::fmt::{Display, Formatter};

use geoviewer_types::error::GeoViewerTypesError;
use thiserror::Error;

/// Reason why a protocol cannot be rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The protocol is known, but no layer constructor is registered for it yet.
    NotYetImplemented,
    /// The protocol name is not one of the known protocols.
    Unrecognized,
}

impl Display for UnsupportedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotYetImplemented => write!(f, "not yet implemented"),
            Self::Unrecognized => write!(f, "unrecognized protocol"),
        }
    }
}

/// Viewer error type.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Basemap with the given name is not registered.
    #[error("unknown basemap \"{0}\"")]
    UnknownBasemap(String),
    /// Bounds geometry cannot be parsed or has no extent.
    #[error("failed to parse bounds geometry: {0}")]
    GeometryParse(#[from] GeoViewerTypesError),
    /// The layer for the protocol cannot be constructed.
    #[error("unsupported protocol name \"{protocol}\": {reason}")]
    UnsupportedProtocol {
        /// Protocol name as given in the configuration.
        protocol: String,
        /// Why the protocol is not supported.
        reason: UnsupportedReason,
    },
    /// Control with the given name is not registered.
    #[error("unsupported control name \"{0}\"")]
    UnrecognizedControl(String),
    /// A layer constructor rejected its input.
    #[error("invalid layer: {0}")]
    InvalidLayer(String),
    /// Viewer configuration cannot be read.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for ViewerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Configuration(value.to_string())
    }
}
