//! Viewer configuration supplied by the host page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::layer::basemap::DEFAULT_BASEMAP;
use crate::layer::LayerOptions;
use crate::protocol::ProtocolKind;

/// Layer settings shared by all viewers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayersSettings {
    /// Request high resolution tiles on HiDPI screens.
    #[serde(rename = "DETECT_RETINA", default, skip_serializing_if = "Option::is_none")]
    pub detect_retina: Option<bool>,
}

/// Settings of the viewer for a single protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolViewerSettings {
    /// Names of the controls attached to the overlay once it is loaded.
    #[serde(rename = "CONTROLS", default)]
    pub controls: Vec<String>,
}

/// Free-form viewer options.
///
/// ```json
/// {
///   "opacity": 0.75,
///   "LAYERS": { "DETECT_RETINA": true },
///   "VIEWERS": { "WMS": { "CONTROLS": ["Opacity", "Fullscreen"] } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsBag {
    /// Opacity of the overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Layer settings.
    #[serde(rename = "LAYERS", default)]
    pub layers: LayersSettings,
    /// Per-protocol viewer settings keyed by the uppercased protocol name.
    #[serde(rename = "VIEWERS", default)]
    pub viewers: HashMap<String, ProtocolViewerSettings>,
}

impl OptionsBag {
    /// Sets the overlay opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the `LAYERS.DETECT_RETINA` flag.
    pub fn with_detect_retina(mut self, detect_retina: bool) -> Self {
        self.layers.detect_retina = Some(detect_retina);
        self
    }

    /// Sets the controls attached to overlays of the given protocol.
    pub fn with_controls<S: Into<String>>(
        mut self,
        protocol: ProtocolKind,
        controls: impl IntoIterator<Item = S>,
    ) -> Self {
        self.viewers.insert(
            protocol.viewer_key(),
            ProtocolViewerSettings {
                controls: controls.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Value of the `LAYERS.DETECT_RETINA` flag, `false` if not set.
    pub fn detect_retina(&self) -> bool {
        self.layers.detect_retina.unwrap_or(false)
    }

    /// Names of the controls configured for the protocol.
    pub fn controls_for(&self, protocol: ProtocolKind) -> &[String] {
        self.viewers
            .get(&protocol.viewer_key())
            .map(|settings| settings.controls.as_slice())
            .unwrap_or_default()
    }
}

/// Description of the resource shown by the viewer and how to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// URL of the service.
    pub url: String,
    /// Name of the protocol the resource is published with.
    pub protocol: String,
    /// Whether the resource can be rendered.
    #[serde(default)]
    pub available: bool,
    /// Viewer options.
    #[serde(default)]
    pub options: OptionsBag,
    /// Name of the background map.
    #[serde(rename = "basemap", default)]
    pub basemap_name: Option<String>,
    /// GeoJSON geometry of the resource extent, either as a JSON value or as a string.
    #[serde(rename = "mapGeom", default)]
    pub geometry: Option<serde_json::Value>,
    /// Name of the layer on the remote service.
    #[serde(default)]
    pub layer_id: Option<String>,
    /// Draw the resource bounds when the resource itself cannot be shown.
    #[serde(default)]
    pub draw_initial_bounds: bool,
}

impl ViewerConfig {
    /// Creates a configuration of an unavailable resource with default options.
    pub fn new(url: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            protocol: protocol.into(),
            available: false,
            options: OptionsBag::default(),
            basemap_name: None,
            geometry: None,
            layer_id: None,
            draw_initial_bounds: false,
        }
    }

    /// Reads the configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the availability flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Replaces viewer options.
    pub fn with_options(mut self, options: OptionsBag) -> Self {
        self.options = options;
        self
    }

    /// Sets the basemap name.
    pub fn with_basemap(mut self, name: impl Into<String>) -> Self {
        self.basemap_name = Some(name.into());
        self
    }

    /// Sets the GeoJSON geometry of the resource.
    pub fn with_geometry(mut self, geometry: serde_json::Value) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Sets the remote layer name.
    pub fn with_layer_id(mut self, layer_id: impl Into<String>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }

    /// Sets the flag to draw resource bounds.
    pub fn with_draw_initial_bounds(mut self, draw: bool) -> Self {
        self.draw_initial_bounds = draw;
        self
    }

    /// Protocol of the resource.
    pub fn protocol_kind(&self) -> Result<ProtocolKind, ViewerError> {
        self.protocol.parse()
    }

    /// Name of the basemap to use. Missing or empty name means the default basemap.
    pub fn basemap_name(&self) -> &str {
        match self.basemap_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_BASEMAP,
        }
    }

    /// Options passed to the overlay constructor.
    pub fn layer_options(&self) -> LayerOptions {
        LayerOptions {
            layer_id: self.layer_id.clone(),
            opacity: self.options.opacity,
            detect_retina: self.options.detect_retina(),
            tms: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_full_config() {
        let config = ViewerConfig::from_json(
            r#"{
                "url": "https://geo.example.edu/wms",
                "protocol": "wms",
                "available": true,
                "layerId": "druid:abc123",
                "basemap": "Positron",
                "drawInitialBounds": true,
                "mapGeom": {"type": "Point", "coordinates": [10.0, 20.0]},
                "options": {
                    "opacity": 0.5,
                    "LAYERS": {"DETECT_RETINA": true},
                    "VIEWERS": {"WMS": {"CONTROLS": ["Opacity", "Fullscreen"]}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.protocol_kind().unwrap(), ProtocolKind::Wms);
        assert_eq!(config.basemap_name(), "Positron");
        assert_eq!(
            config.geometry,
            Some(json!({"type": "Point", "coordinates": [10.0, 20.0]}))
        );
        assert!(config.draw_initial_bounds);
        assert_eq!(
            config.options.controls_for(ProtocolKind::Wms),
            ["Opacity", "Fullscreen"]
        );
        assert!(config.options.controls_for(ProtocolKind::Xyz).is_empty());
        assert_eq!(
            config.layer_options(),
            LayerOptions {
                layer_id: Some("druid:abc123".into()),
                opacity: Some(0.5),
                detect_retina: true,
                tms: false,
            }
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config =
            ViewerConfig::from_json(r#"{"url": "https://x", "protocol": "Xyz", "mapGeom": null}"#)
                .unwrap();

        assert_eq!(config, ViewerConfig::new("https://x", "Xyz"));
        assert_eq!(config.basemap_name(), DEFAULT_BASEMAP);
        assert!(!config.options.detect_retina());
        assert_eq!(config.layer_options(), LayerOptions::default());
    }

    #[test]
    fn empty_basemap_name_is_default() {
        let config = ViewerConfig::new("https://x", "Xyz").with_basemap("");
        assert_eq!(config.basemap_name(), DEFAULT_BASEMAP);
    }

    #[test]
    fn unknown_protocol_is_kept_as_given() {
        let config = ViewerConfig::new("https://x", "Gopher");
        assert_eq!(config.protocol, "Gopher");
        assert_matches!(
            config.protocol_kind(),
            Err(ViewerError::UnsupportedProtocol { .. })
        );
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        assert_matches!(
            ViewerConfig::from_json("{\"url\": 1"),
            Err(ViewerError::Configuration(_))
        );
        assert_matches!(
            ViewerConfig::from_json("{\"url\": \"https://x\"}"),
            Err(ViewerError::Configuration(_))
        );
    }

    #[test]
    fn builder_sets_controls_by_protocol_key() {
        let options = OptionsBag::default()
            .with_opacity(0.3)
            .with_detect_retina(true)
            .with_controls(ProtocolKind::IndexMap, ["Opacity"]);

        assert_eq!(options.viewers["INDEXMAP"].controls, ["Opacity"]);
        assert!(options.detect_retina());
        assert_eq!(options.opacity, Some(0.3));
    }
}
