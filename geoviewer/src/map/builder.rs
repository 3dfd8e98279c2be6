use geoviewer_types::geo::LatLngBounds;

use super::Map;
use crate::error::ViewerError;
use crate::layer::Layer;
use crate::messenger::Messenger;
use crate::view::{MapView, Size};

/// Map builder.
///
/// ```
/// use geoviewer::layer::TileLayerBuilder;
/// use geoviewer::map::MapBuilder;
/// use geoviewer_types::geo::LatLngBounds;
///
/// let map = MapBuilder::default()
///     .with_basemap(TileLayerBuilder::new_osm().build()?)
///     .with_bounds(LatLngBounds::from_pairs([-30.0, -100.0], [30.0, 100.0]))
///     .build()?;
/// # Ok::<(), geoviewer::error::ViewerError>(())
/// ```
#[derive(Default)]
pub struct MapBuilder {
    basemap: Option<Box<dyn Layer>>,
    bounds: Option<LatLngBounds>,
    size: Option<Size>,
    dpi_scale_factor: Option<f32>,
    messenger: Option<Box<dyn Messenger>>,
}

impl MapBuilder {
    /// Sets the background layer.
    pub fn with_basemap(self, basemap: impl Layer + 'static) -> Self {
        self.with_boxed_basemap(Box::new(basemap))
    }

    /// Sets the background layer given as a trait object.
    pub fn with_boxed_basemap(mut self, basemap: Box<dyn Layer>) -> Self {
        self.basemap = Some(basemap);
        self
    }

    /// Sets the area the map view is fitted to.
    pub fn with_bounds(mut self, bounds: LatLngBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the size of the viewport in pixels.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the DPI scale factor of the screen.
    pub fn with_dpi_scale_factor(mut self, dpi_scale_factor: f32) -> Self {
        self.dpi_scale_factor = Some(dpi_scale_factor);
        self
    }

    /// Sets the messenger notified about changes of the map.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Consumes the builder and creates the map. Fails if no basemap was set.
    pub fn build(self) -> Result<Map, ViewerError> {
        let MapBuilder {
            basemap,
            bounds,
            size,
            dpi_scale_factor,
            messenger,
        } = self;

        let basemap = basemap
            .ok_or_else(|| ViewerError::Configuration("map must have a basemap".into()))?;
        let size = size.unwrap_or_default();
        let view = match bounds {
            Some(bounds) => MapView::fit_bounds(&bounds, size),
            None => MapView::default().with_size(size),
        };

        let mut map = Map::new(view, basemap, messenger);
        if let Some(dpi_scale_factor) = dpi_scale_factor {
            map.dpi_scale_factor = dpi_scale_factor;
        }

        Ok(map)
    }
}
