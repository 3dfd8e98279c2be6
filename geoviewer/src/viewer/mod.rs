//! [`ViewerController`] sets up the map for a single resource: the basemap, the view fitted to the
//! resource bounds, and either the resource overlay with its controls or a preview of its bounds.

use std::fmt::{Display, Formatter};

use geoviewer_types::geo::LatLngBounds;

use crate::bounds::{default_bounds, BoundsCalculator};
use crate::config::ViewerConfig;
use crate::control::{ControlRegistry, ControlTarget};
use crate::diagnostics::{emit, Diagnostic, DiagnosticCode, DiagnosticsSink, Severity};
use crate::error::ViewerError;
use crate::layer::{BasemapRegistry, Layer, LayerFactory, PolygonLayer};
use crate::map::{LayerHandle, Map, MapBuilder};


/// Stage of the viewer initialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewerState {
    /// The map is being created.
    Initializing,
    /// The map has its basemap and the view is fitted to the resource bounds.
    MapReady,
    /// The overlay layer is being constructed.
    OverlayPending,
    /// The overlay layer is on the map.
    OverlayLoaded,
    /// The overlay layer could not be constructed for the resource protocol.
    OverlayUnsupported,
    /// The resource is unavailable and its bounds are drawn instead.
    BoundsPreviewShown,
}

impl Display for ViewerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Lookup tables the controller creates layers and controls with.
#[derive(Default)]
pub struct Registries {
    /// Background maps.
    pub basemaps: BasemapRegistry,
    /// Overlay constructors by protocol.
    pub layers: LayerFactory,
    /// Controls by name.
    pub controls: ControlRegistry,
}

/// Owns the map of a single resource viewer and drives its initialization.
///
/// ```no_run
/// use geoviewer::config::ViewerConfig;
/// use geoviewer::diagnostics::DiagnosticLog;
/// use geoviewer::viewer::{Registries, ViewerController};
///
/// # async fn run() -> Result<(), geoviewer::error::ViewerError> {
/// let config = ViewerConfig::new("https://tiles.example.org/{z}/{x}/{y}.png", "Xyz")
///     .with_available(true);
/// let viewer = ViewerController::initialize(config, Registries::default(), DiagnosticLog::new()).await?;
/// # Ok(())
/// # }
/// ```
pub struct ViewerController {
    config: ViewerConfig,
    registries: Registries,
    diagnostics: Box<dyn DiagnosticsSink>,
    map: Map,
    bounds: LatLngBounds,
    state: ViewerState,
    data_overlay: Option<LayerHandle>,
    bounds_overlay: Option<LayerHandle>,
    load_started: bool,
}

impl ViewerController {
    /// Creates the map with the basemap and fits the view to the resource bounds.
    ///
    /// Fails only if the configured basemap is unknown. A malformed geometry is reported to
    /// `diagnostics` and the default bounds are used instead.
    pub fn new(
        config: ViewerConfig,
        registries: Registries,
        diagnostics: impl DiagnosticsSink + 'static,
    ) -> Result<Self, ViewerError> {
        Self::with_map_builder(config, registries, diagnostics, MapBuilder::default())
    }

    /// Same as [`ViewerController::new`], but uses the given builder for the map, which allows
    /// to set the viewport size, the DPI scale factor and the messenger. The basemap and the
    /// bounds of the builder are replaced.
    pub fn with_map_builder(
        config: ViewerConfig,
        registries: Registries,
        diagnostics: impl DiagnosticsSink + 'static,
        map_builder: MapBuilder,
    ) -> Result<Self, ViewerError> {
        log::debug!("Viewer state: {}", ViewerState::Initializing);
        let diagnostics: Box<dyn DiagnosticsSink> = Box::new(diagnostics);

        let basemap = registries.basemaps.get(config.basemap_name())?;

        let bounds = match BoundsCalculator.compute(config.geometry.as_ref()) {
            Ok(bounds) => bounds,
            Err(err) => {
                emit(&*diagnostics, Diagnostic::from_error(&err));
                default_bounds()
            }
        };

        let map = map_builder
            .with_basemap(basemap)
            .with_bounds(bounds)
            .build()?;

        let mut controller = Self {
            config,
            registries,
            diagnostics,
            map,
            bounds,
            state: ViewerState::Initializing,
            data_overlay: None,
            bounds_overlay: None,
            load_started: false,
        };
        controller.set_state(ViewerState::MapReady);

        Ok(controller)
    }

    /// Creates the viewer and loads the resource overlay.
    pub async fn initialize(
        config: ViewerConfig,
        registries: Registries,
        diagnostics: impl DiagnosticsSink + 'static,
    ) -> Result<Self, ViewerError> {
        let mut controller = Self::new(config, registries, diagnostics)?;
        controller.load().await;

        Ok(controller)
    }

    /// Adds the resource overlay and its controls if the resource is available, or the bounds
    /// preview if it is not and the configuration asks for it.
    ///
    /// Problems are reported to the diagnostics sink. The method runs only once, later calls
    /// report [`DiagnosticCode::AlreadyLoaded`] and do nothing.
    pub async fn load(&mut self) {
        if self.load_started {
            self.report(Diagnostic::new(
                Severity::Info,
                DiagnosticCode::AlreadyLoaded,
                "viewer is already loaded",
            ));
            return;
        }
        self.load_started = true;

        if self.config.available {
            self.load_overlay().await;
        } else if self.config.draw_initial_bounds {
            let preview = PolygonLayer::from_bounds(&self.bounds);
            self.bounds_overlay = Some(self.map.add_overlay(Box::new(preview)));
            self.set_state(ViewerState::BoundsPreviewShown);
        }
    }

    async fn load_overlay(&mut self) {
        self.set_state(ViewerState::OverlayPending);

        let protocol = match self.config.protocol_kind() {
            Ok(protocol) => protocol,
            Err(err) => {
                self.fail_overlay(&err);
                return;
            }
        };

        let layer = self
            .registries
            .layers
            .build(protocol, &self.config.url, self.config.layer_options())
            .await;
        let layer = match layer {
            Ok(layer) => layer,
            Err(err) => {
                self.fail_overlay(&err);
                return;
            }
        };

        let handle = self.map.add_overlay(layer);
        self.data_overlay = Some(handle);
        self.set_state(ViewerState::OverlayLoaded);

        let target = ControlTarget {
            layer: handle,
            opacity: self.config.options.opacity,
        };
        for name in self.config.options.controls_for(protocol) {
            match self.registries.controls.get(name, &target) {
                Ok(control) => self.map.add_control(control),
                Err(err) => emit(&*self.diagnostics, Diagnostic::from_error(&err)),
            }
        }
    }

    fn fail_overlay(&mut self, error: &ViewerError) {
        self.report(Diagnostic::from_error(error));
        self.set_state(ViewerState::OverlayUnsupported);
    }

    /// Removes the bounds preview from the map. Returns false if there was no preview.
    pub fn remove_bounds_overlay(&mut self) -> bool {
        let Some(handle) = self.bounds_overlay.take() else {
            return false;
        };

        self.map.remove_overlay(handle);
        if self.state == ViewerState::BoundsPreviewShown {
            self.set_state(ViewerState::MapReady);
        }

        true
    }

    /// Current stage of the initialization.
    pub fn state(&self) -> ViewerState {
        self.state
    }

    /// Configuration the viewer was created with.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The map.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// The map as mutable. Use it to change the view or operate the controls.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Bounds of the resource the view was fitted to.
    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    /// The resource overlay, if loaded.
    pub fn data_overlay(&self) -> Option<&dyn Layer> {
        self.data_overlay
            .and_then(|handle| self.map.overlay().get(handle))
    }

    /// The bounds preview, if shown.
    pub fn bounds_overlay(&self) -> Option<&PolygonLayer> {
        self.bounds_overlay
            .and_then(|handle| self.map.overlay().get(handle))
            .and_then(|layer| layer.as_any().downcast_ref())
    }

    fn report(&self, diagnostic: Diagnostic) {
        emit(&*self.diagnostics, diagnostic);
    }

    fn set_state(&mut self, state: ViewerState) {
        log::debug!("Viewer state: {} -> {state}", self.state);
        self.state = state;
    }
}
