use super::TileLayer;
use crate::attribution::Attribution;
use crate::error::ViewerError;
use crate::layer::LayerOptions;
use crate::tile_schema::{TileIndex, TileSchema};

const DEFAULT_SUBDOMAINS: &str = "abc";
const DEFAULT_LODS: u32 = 18;

/// Constructor for a [`TileLayer`].
///
/// ```
/// use geoviewer::layer::TileLayerBuilder;
///
/// let layer = TileLayerBuilder::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
///     .with_opacity(0.75)
///     .build()?;
/// # Ok::<(), geoviewer::error::ViewerError>(())
/// ```
pub struct TileLayerBuilder {
    url_template: String,
    subdomains: String,
    options: LayerOptions,
    lods_count: u32,
    attribution: Option<Attribution>,
}

impl TileLayerBuilder {
    /// Initializes a builder for a layer that requests tiles by the given URL template.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            subdomains: DEFAULT_SUBDOMAINS.to_string(),
            options: LayerOptions::default(),
            lods_count: DEFAULT_LODS,
            attribution: None,
        }
    }

    #[allow(rustdoc::bare_urls)]
    /// Initializes a builder for a tile layer with the Open Street Map source.
    ///
    /// It uses the standard "https://tile.openstreetmap.org/{z}/{x}/{y}.png" URL pattern to
    /// retrieve the tiles.
    pub fn new_osm() -> Self {
        Self::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png").with_attribution(
            "© OpenStreetMap contributors".to_string(),
            "https://www.openstreetmap.org/copyright".to_string(),
        )
    }

    /// Replaces all layer options.
    pub fn with_options(mut self, options: LayerOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the layer id.
    pub fn with_layer_id(mut self, layer_id: impl Into<String>) -> Self {
        self.options.layer_id = Some(layer_id.into());
        self
    }

    /// Sets the layer opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.options.opacity = Some(opacity);
        self
    }

    /// Requests tiles of the next z-level on HiDPI screens when set.
    pub fn with_detect_retina(mut self, detect_retina: bool) -> Self {
        self.options.detect_retina = detect_retina;
        self
    }

    /// Sets TMS row numbering (rows are counted from the bottom of the map).
    pub fn with_tms(mut self, tms: bool) -> Self {
        self.options.tms = tms;
        self
    }

    /// Sets the subdomains substituted for the `{s}` placeholder, one character per subdomain.
    ///
    /// Defaults to `abc`.
    pub fn with_subdomains(mut self, subdomains: impl Into<String>) -> Self {
        self.subdomains = subdomains.into();
        self
    }

    /// Sets the number of z-levels of the tile set.
    ///
    /// Defaults to 18.
    pub fn with_lods_count(mut self, lods_count: u32) -> Self {
        self.lods_count = lods_count;
        self
    }

    /// Sets the custom attribution with the given text and URL.
    pub fn with_attribution(mut self, text: String, url: String) -> Self {
        self.attribution = Some(Attribution::new(text, Some(url)));
        self
    }

    /// Consumes the builder and constructs the tile layer.
    ///
    /// Will return an error if the URL template is empty, contains unknown placeholders, uses
    /// `{s}` without subdomains, or if the tile set has no z-levels.
    pub fn build(self) -> Result<TileLayer, ViewerError> {
        let Self {
            url_template,
            subdomains,
            options,
            lods_count,
            attribution,
        } = self;

        if url_template.trim().is_empty() {
            return Err(ViewerError::InvalidLayer(
                "tile url template is empty".into(),
            ));
        }

        if lods_count == 0 {
            return Err(ViewerError::InvalidLayer(
                "tile set must have at least one z-level".into(),
            ));
        }

        let subdomains: Vec<String> = subdomains.chars().map(String::from).collect();
        if subdomains.is_empty() && url_template.contains("{s}") {
            return Err(ViewerError::InvalidLayer(
                "url template uses {s} but no subdomains are set".into(),
            ));
        }

        let tile_schema = if options.tms {
            TileSchema::web_tms(lods_count)
        } else {
            TileSchema::web(lods_count)
        };

        let layer = TileLayer {
            url_template,
            subdomains,
            options,
            tile_schema,
            attribution,
        };

        layer.tile_url(TileIndex::new(0, 0, 0), false)?;

        Ok(layer)
    }
}
