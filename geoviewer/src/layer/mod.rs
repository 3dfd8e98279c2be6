//! [Layers](Layer) specify a data source and the way the data should be rendered to the map.

use std::any::Any;

use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};

use crate::attribution::Attribution;
use crate::view::MapView;
use crate::TileSchema;

pub mod basemap;
pub mod factory;
pub mod polygon_layer;
pub mod tile_layer;
pub mod wms_layer;

pub use basemap::BasemapRegistry;
pub use factory::{LayerFactory, OverlayConstructor};
pub use polygon_layer::PolygonLayer;
pub use tile_layer::{TileLayer, TileLayerBuilder};
pub use wms_layer::WmsLayer;

/// Layers specify a data source and the way the data should be rendered to the map.
///
/// The viewer works with three types of layers:
/// * [`TileLayer`] - prerendered XYZ or TMS tiles requested by a URL template.
/// * [`WmsLayer`] - tiles rendered on demand by a WMS server.
/// * [`PolygonLayer`] - a polygon given by its vertices, used to preview the resource bounds.
pub trait Layer: MaybeSend + MaybeSync {
    /// URLs the rendering engine needs to fetch to draw the layer for the given view.
    fn requests(&self, view: &MapView, dpi_scale_factor: f32) -> Vec<String>;
    /// Opacity of the layer in `[0, 1]`.
    fn opacity(&self) -> f32 {
        1.0
    }
    /// Sets the opacity of the layer. The value is clamped to `[0, 1]`.
    fn set_opacity(&mut self, _opacity: f32) {}
    /// A map stores layers as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// A map stores layers as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Tile schema of the layer if any.
    fn tile_schema(&self) -> Option<TileSchema> {
        None
    }
    /// Returns the attribution of the layer, if available.
    fn attribution(&self) -> Option<Attribution>;
}

/// Options every overlay layer accepts.
///
/// The viewer forwards these values to the layer constructors unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOptions {
    /// Name of the layer on the remote service (WMS `LAYERS` parameter).
    pub layer_id: Option<String>,
    /// Opacity of the layer. Fully opaque if not set.
    pub opacity: Option<f32>,
    /// Request higher resolution tiles on HiDPI screens.
    pub detect_retina: bool,
    /// Rows of the tile set are numbered from the bottom of the map.
    pub tms: bool,
}

impl LayerOptions {
    /// Opacity the layer is drawn with.
    pub fn effective_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Returns true if retina tiles should be requested on a screen with the given scale factor.
    pub fn uses_retina(&self, dpi_scale_factor: f32) -> bool {
        self.detect_retina && dpi_scale_factor > 1.0
    }
}

/// Used in tests.
#[cfg(test)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TestLayer(pub &'static str, pub f32);

#[cfg(test)]
impl Layer for TestLayer {
    fn requests(&self, _view: &MapView, _dpi_scale_factor: f32) -> Vec<String> {
        vec![self.0.to_string()]
    }

    fn opacity(&self) -> f32 {
        self.1
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.1 = opacity.clamp(0.0, 1.0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn attribution(&self) -> Option<Attribution> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_opacity_defaults_to_opaque() {
        assert_eq!(LayerOptions::default().effective_opacity(), 1.0);

        let options = LayerOptions {
            opacity: Some(1.5),
            ..Default::default()
        };
        assert_eq!(options.effective_opacity(), 1.0);
    }

    #[test]
    fn retina_requires_flag_and_hidpi_screen() {
        let options = LayerOptions {
            detect_retina: true,
            ..Default::default()
        };

        assert!(options.uses_retina(2.0));
        assert!(!options.uses_retina(1.0));
        assert!(!LayerOptions::default().uses_retina(2.0));
    }
}
