//! Geoviewer sets up an interactive map for a single geospatial resource. Given a description of
//! the resource (the service URL, its protocol, whether it can be shown, and some viewer options)
//! it selects the background map, computes the area to show, and either creates an overlay layer
//! for the resource with its controls or draws the resource bounds.
//!
//! # Quick start
//!
//! ```no_run
//! use geoviewer::config::{OptionsBag, ViewerConfig};
//! use geoviewer::diagnostics::DiagnosticLog;
//! use geoviewer::protocol::ProtocolKind;
//! use geoviewer::viewer::{Registries, ViewerController};
//!
//! # async fn run() -> Result<(), geoviewer::error::ViewerError> {
//! let config = ViewerConfig::new("https://geo.example.edu/wms", "Wms")
//!     .with_available(true)
//!     .with_layer_id("sde:nyc_roads")
//!     .with_options(OptionsBag::default().with_controls(ProtocolKind::Wms, ["Opacity"]));
//!
//! let diagnostics = DiagnosticLog::new();
//! let viewer =
//!     ViewerController::initialize(config, Registries::default(), diagnostics.clone()).await?;
//!
//! for url in viewer.map().requests() {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Main components
//!
//! * [`ViewerController`](viewer::ViewerController) owns the [`Map`] and runs the initialization.
//! * [`BasemapRegistry`](layer::BasemapRegistry) creates the background layer by its name.
//! * [`LayerFactory`](layer::LayerFactory) creates the overlay [layer](layer) for a
//!   [protocol](protocol::ProtocolKind).
//! * [`ControlRegistry`](control::ControlRegistry) creates the [controls](control) attached to
//!   the overlay.
//! * [`BoundsCalculator`](bounds::BoundsCalculator) derives the area to show from the resource
//!   geometry.
//!
//! Problems that do not prevent the map from being shown are reported through
//! [`diagnostics`] instead of being returned as errors.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod attribution;
pub mod bounds;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod layer;
mod lod;
pub mod map;
mod messenger;
pub mod protocol;
pub mod tile_schema;
mod view;
pub mod viewer;

pub use attribution::Attribution;
pub use lod::Lod;
pub use map::{Map, MapBuilder};
pub use messenger::{DummyMessenger, Messenger};
pub use tile_schema::TileSchema;
pub use view::{MapView, Size};

// Reexport geoviewer_types
pub use geoviewer_types;
