//! Tile layers backed by a URL template (XYZ and TMS tile sets).

use std::any::Any;
use std::collections::HashMap;

use super::{Layer, LayerOptions};
use crate::attribution::Attribution;
use crate::error::ViewerError;
use crate::tile_schema::{TileIndex, TileSchema};
use crate::view::MapView;

mod builder;
pub use builder::TileLayerBuilder;

/// Layer of prerendered tiles requested by a URL template.
///
/// The template may contain the following placeholders:
/// * `{z}`, `{x}`, `{y}` - tile index. For TMS layers `{y}` is counted from the bottom of the map.
/// * `{s}` - one of the subdomains, chosen by the tile index.
/// * `{r}` - `@2x` when high resolution tiles are requested, empty otherwise.
#[derive(Debug, Clone)]
pub struct TileLayer {
    url_template: String,
    subdomains: Vec<String>,
    options: LayerOptions,
    tile_schema: TileSchema,
    attribution: Option<Attribution>,
}

impl TileLayer {
    /// URL template of the layer.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Options the layer was created with.
    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    /// Returns true if the layer uses TMS row numbering.
    pub fn is_tms(&self) -> bool {
        self.options.tms
    }

    /// Substitutes the tile index into the URL template.
    pub fn tile_url(&self, index: TileIndex, retina: bool) -> Result<String, ViewerError> {
        let mut vars = HashMap::new();
        vars.insert("z".to_string(), index.z.to_string());
        vars.insert("x".to_string(), index.x.to_string());
        vars.insert("y".to_string(), index.y.to_string());
        vars.insert(
            "r".to_string(),
            if retina { "@2x" } else { "" }.to_string(),
        );
        if !self.subdomains.is_empty() {
            let i = (index.x + index.y).unsigned_abs() as usize % self.subdomains.len();
            vars.insert("s".to_string(), self.subdomains[i].clone());
        }

        strfmt::strfmt(&self.url_template, &vars)
            .map_err(|err| ViewerError::InvalidLayer(format!("bad tile url template: {err}")))
    }

    fn request_z(&self, view_z: u32, retina: bool) -> u32 {
        let z = if retina { view_z + 1 } else { view_z };
        self.tile_schema.max_z().map_or(z, |max| z.min(max))
    }
}

impl Layer for TileLayer {
    fn requests(&self, view: &MapView, dpi_scale_factor: f32) -> Vec<String> {
        let retina = self.options.uses_retina(dpi_scale_factor);
        let z = self.request_z(view.z_level(), retina);
        let Some(tiles) = view
            .get_bbox()
            .and_then(|bbox| self.tile_schema.iter_tiles_over_bbox(z, bbox))
        else {
            return vec![];
        };

        tiles
            .filter_map(|index| match self.tile_url(index, retina) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("Skipping tile {index:?}: {err}");
                    None
                }
            })
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
        self.attribution.clone()
    }
}

#[cfg(test)]
mod tests {
    use geoviewer_types::geo::GeoPoint2d;
    use geoviewer_types::latlon;

    use super::*;
    use crate::view::Size;

    fn world_view() -> MapView {
        MapView::new(GeoPoint2d::default(), 1, Size::new(512, 512))
    }

    #[test]
    fn xyz_urls_for_whole_world() {
        let layer = TileLayerBuilder::new("https://x/{z}/{x}/{y}.png")
            .build()
            .unwrap();
        let mut urls = layer.requests(&world_view(), 1.0);
        urls.sort();

        assert_eq!(
            urls,
            vec![
                "https://x/1/0/0.png",
                "https://x/1/0/1.png",
                "https://x/1/1/0.png",
                "https://x/1/1/1.png",
            ]
        );
    }

    #[test]
    fn tms_rows_are_counted_from_bottom() {
        let xyz = TileLayerBuilder::new("https://x/{z}/{x}/{y}.png")
            .build()
            .unwrap();
        let tms = TileLayerBuilder::new("https://x/{z}/{x}/{y}.png")
            .with_tms(true)
            .build()
            .unwrap();

        // A tiny viewport north-east of the origin touches only the upper right tile.
        let view = MapView::new(latlon!(40.0, 45.0), 1, Size::new(10, 10));

        assert_eq!(xyz.requests(&view, 1.0), vec!["https://x/1/1/0.png"]);
        assert_eq!(tms.requests(&view, 1.0), vec!["https://x/1/1/1.png"]);
    }

    #[test]
    fn retina_requests_deeper_level() {
        let layer = TileLayerBuilder::new("https://x/{z}/{x}/{y}{r}.png")
            .with_detect_retina(true)
            .build()
            .unwrap();
        let view = MapView::new(latlon!(40.0, 45.0), 1, Size::new(10, 10));

        let urls = layer.requests(&view, 2.0);
        assert_eq!(urls, vec!["https://x/2/2/1@2x.png"]);

        let urls = layer.requests(&view, 1.0);
        assert_eq!(urls, vec!["https://x/1/1/0.png"]);
    }

    #[test]
    fn subdomains_rotate_by_index() {
        let layer = TileLayerBuilder::new("https://{s}.tiles/{z}/{x}/{y}.png")
            .build()
            .unwrap();

        assert_eq!(
            layer.tile_url(TileIndex::new(0, 0, 3), false).unwrap(),
            "https://a.tiles/3/0/0.png"
        );
        assert_eq!(
            layer.tile_url(TileIndex::new(1, 0, 3), false).unwrap(),
            "https://b.tiles/3/1/0.png"
        );
        assert_eq!(
            layer.tile_url(TileIndex::new(1, 1, 3), false).unwrap(),
            "https://c.tiles/3/1/1.png"
        );
    }

    #[test]
    fn set_opacity_clamps() {
        let mut layer = TileLayerBuilder::new("https://x/{z}/{x}/{y}.png")
            .with_opacity(0.4)
            .build()
            .unwrap();
        assert_eq!(layer.opacity(), 0.4);

        layer.set_opacity(-1.0);
        assert_eq!(layer.opacity(), 0.0);
        assert_eq!(layer.options().opacity, Some(0.0));
    }
}
