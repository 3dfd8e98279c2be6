//! Named background maps.

use std::collections::HashMap;

use super::{TileLayer, TileLayerBuilder};
use crate::error::ViewerError;

/// Name of the basemap used when the configuration does not name one.
pub const DEFAULT_BASEMAP: &str = "Streets";

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const CARTO_ATTRIBUTION: &str = "© OpenStreetMap contributors © CARTO";
const CARTO_URL: &str = "https://carto.com/attributions";

type BasemapConstructor = Box<dyn Fn() -> TileLayerBuilder + Send + Sync>;

/// Lookup table of background map constructors keyed by the basemap name.
///
/// The default registry contains `Streets`, `Positron`, `PositronLite`, `DarkMatter`,
/// `OpenStreetMapHot` and `WorldImagery`. Names are case-sensitive.
pub struct BasemapRegistry {
    constructors: HashMap<String, BasemapConstructor>,
}

impl BasemapRegistry {
    /// Creates a registry without any basemaps.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers a basemap, replacing the one with the same name if any.
    pub fn with_basemap(
        mut self,
        name: impl Into<String>,
        constructor: impl Fn() -> TileLayerBuilder + Send + Sync + 'static,
    ) -> Self {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }

    /// Constructs the basemap with the given name.
    pub fn get(&self, name: &str) -> Result<TileLayer, ViewerError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ViewerError::UnknownBasemap(name.to_string()))?;

        constructor().build()
    }

    /// Returns true if a basemap with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Sorted names of all registered basemaps.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for BasemapRegistry {
    fn default() -> Self {
        Self::empty()
            .with_basemap(DEFAULT_BASEMAP, TileLayerBuilder::new_osm)
            .with_basemap("Positron", || {
                carto("https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png")
            })
            .with_basemap("PositronLite", || {
                carto("https://{s}.basemaps.cartocdn.com/light_nolabels/{z}/{x}/{y}{r}.png")
            })
            .with_basemap("DarkMatter", || {
                carto("https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png")
            })
            .with_basemap("OpenStreetMapHot", || {
                TileLayerBuilder::new("https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png")
                    .with_attribution(
                        format!("{OSM_ATTRIBUTION}, tiles style by Humanitarian OpenStreetMap Team hosted by OpenStreetMap France"),
                        "https://www.hotosm.org/".to_string(),
                    )
            })
            .with_basemap("WorldImagery", || {
                TileLayerBuilder::new(
                    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                )
                .with_attribution(
                    "Tiles © Esri, sources: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP and the GIS User Community".to_string(),
                    "https://www.esri.com/".to_string(),
                )
            })
    }
}

fn carto(url_template: &str) -> TileLayerBuilder {
    TileLayerBuilder::new(url_template)
        .with_subdomains("abcd")
        .with_detect_retina(true)
        .with_attribution(CARTO_ATTRIBUTION.to_string(), CARTO_URL.to_string())
}
