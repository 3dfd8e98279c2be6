//! Layer of tiles rendered on demand by a WMS server.

use std::any::Any;

use url::form_urlencoded;

use super::{Layer, LayerOptions};
use crate::attribution::Attribution;
use crate::error::ViewerError;
use crate::tile_schema::{TileIndex, TileSchema};
use crate::view::MapView;

const WMS_VERSION: &str = "1.1.1";
const DEFAULT_FORMAT: &str = "image/png";
const WMS_SRS: &str = "EPSG:3857";

/// WMS-backed tiled layer. The map is cut into the standard Web Mercator tiles and every tile is
/// requested as a separate `GetMap` call with the tile extent as `BBOX`.
#[derive(Debug, Clone)]
pub struct WmsLayer {
    url: String,
    options: LayerOptions,
    format: String,
    transparent: bool,
    tile_schema: TileSchema,
}

impl WmsLayer {
    /// Creates a layer for the WMS endpoint at `url`. The `layer_id` option is sent as the `LAYERS`
    /// parameter.
    pub fn new(url: impl Into<String>, options: LayerOptions) -> Result<Self, ViewerError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ViewerError::InvalidLayer("WMS url is empty".into()));
        }

        Ok(Self {
            url,
            options,
            format: DEFAULT_FORMAT.to_string(),
            transparent: true,
            tile_schema: TileSchema::web(18),
        })
    }

    /// Sets the image format requested from the server. Defaults to `image/png`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Sets whether the server should render transparent background. Defaults to `true`.
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Base URL of the service.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Options the layer was created with.
    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    /// `GetMap` request for the given tile.
    pub fn get_map_url(&self, index: TileIndex, retina: bool) -> Option<String> {
        let bbox = self.tile_schema.tile_bbox(index)?;
        let scale = if retina { 2 } else { 1 };
        let width = self.tile_schema.tile_width * scale;
        let height = self.tile_schema.tile_height * scale;

        let separator = match self.url.find('?') {
            None => "?",
            Some(_) if self.url.ends_with('?') || self.url.ends_with('&') => "",
            Some(_) => "&",
        };

        Some(format!(
            "{url}{separator}SERVICE=WMS&REQUEST=GetMap&VERSION={WMS_VERSION}&LAYERS={layers}&STYLES=&FORMAT={format}&TRANSPARENT={transparent}&SRS={WMS_SRS}&WIDTH={width}&HEIGHT={height}&BBOX={x_min},{y_min},{x_max},{y_max}",
            url = self.url,
            layers = encode_value(self.options.layer_id.as_deref().unwrap_or_default()),
            format = encode_value(&self.format),
            transparent = self.transparent,
            x_min = bbox.x_min(),
            y_min = bbox.y_min(),
            x_max = bbox.x_max(),
            y_max = bbox.y_max(),
        ))
    }
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl Layer for WmsLayer {
    fn requests(&self, view: &MapView, dpi_scale_factor: f32) -> Vec<String> {
        let retina = self.options.uses_retina(dpi_scale_factor);
        let Some(tiles) = view
            .get_bbox()
            .and_then(|bbox| self.tile_schema.iter_tiles_over_bbox(view.z_level(), bbox))
        else {
            return vec![];
        };

        tiles
            .filter_map(|index| self.get_map_url(index, retina))
            .collect()
    }

    fn opacity(&self) -> f32 {
        self.options.effective_opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.options.opacity = Some(opacity.clamp(0.0, 1.0));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn tile_schema(&self) -> Option<TileSchema> {
        Some(self.tile_schema.clone())
    }

    fn attribution(&self) -> Option<Attribution> {
        None
    }
}
