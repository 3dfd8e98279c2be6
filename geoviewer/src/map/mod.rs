//! [`Map`] combines the basemap, the overlay group, the controls and the current view.

use geoviewer_types::geo::LatLngBounds;

use crate::attribution::Attribution;
use crate::control::{Control, FullscreenControl, OpacityControl};
use crate::layer::Layer;
use crate::messenger::Messenger;
use crate::view::{MapView, Size};

mod builder;
mod layer_group;

pub use builder::MapBuilder;
pub use layer_group::{LayerGroup, LayerHandle};

/// Map specifies a background layer, a group of overlay layers drawn on top of it, controls and
/// the view that should be rendered.
pub struct Map {
    view: MapView,
    basemap: Box<dyn Layer>,
    overlay: LayerGroup,
    controls: Vec<Box<dyn Control>>,
    messenger: Option<Box<dyn Messenger>>,
    /// DPI scale factor. Is used to request high resolution tiles on HiDPI screens.
    pub dpi_scale_factor: f32,
}

impl Map {
    /// Creates a new map with an empty overlay group.
    pub fn new(
        view: MapView,
        basemap: Box<dyn Layer>,
        messenger: Option<Box<dyn Messenger + 'static>>,
    ) -> Self {
        Self {
            view,
            basemap,
            overlay: LayerGroup::default(),
            controls: vec![],
            messenger,
            dpi_scale_factor: 1.0,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    /// Changes the view so that the whole `bounds` is visible.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.set_view(MapView::fit_bounds(bounds, self.view.size()));
    }

    /// Set the size of the map.
    pub fn set_size(&mut self, new_size: Size) {
        self.view = self.view.with_size(new_size);
    }

    /// Background layer of the map.
    pub fn basemap(&self) -> &dyn Layer {
        &*self.basemap
    }

    /// Layers drawn on top of the basemap.
    pub fn overlay(&self) -> &LayerGroup {
        &self.overlay
    }

    /// Adds the layer to the overlay group.
    pub fn add_overlay(&mut self, layer: Box<dyn Layer>) -> LayerHandle {
        let handle = self.overlay.push_boxed(layer);
        self.redraw();
        handle
    }

    /// Removes the layer from the overlay group together with the controls bound to it.
    pub fn remove_overlay(&mut self, handle: LayerHandle) -> Option<Box<dyn Layer>> {
        let layer = self.overlay.remove(handle)?;
        self.controls
            .retain(|control| control.target() != Some(handle));
        self.redraw();

        Some(layer)
    }

    /// Attaches the control to the map.
    pub fn add_control(&mut self, control: Box<dyn Control>) {
        control.attach(&mut self.overlay);
        self.controls.push(control);
        self.redraw();
    }

    /// Controls attached to the map in the order they were added.
    pub fn controls(&self) -> impl Iterator<Item = &dyn Control> + '_ {
        self.controls.iter().map(|control| &**control)
    }

    /// Names of the attached controls.
    pub fn control_names(&self) -> Vec<&str> {
        self.controls.iter().map(|control| control.name()).collect()
    }

    /// Returns the first attached control of the given type.
    pub fn control<T: Control + 'static>(&self) -> Option<&T> {
        self.controls
            .iter()
            .find_map(|control| control.as_any().downcast_ref::<T>())
    }

    /// Moves the opacity slider of the map. Returns the applied value, or `None` if no opacity
    /// control is attached.
    pub fn set_overlay_opacity(&mut self, value: f32) -> Option<f32> {
        let control = self
            .controls
            .iter_mut()
            .find_map(|control| control.as_any_mut().downcast_mut::<OpacityControl>())?;

        let value = control.set_value(value, &mut self.overlay);
        self.redraw();

        Some(value)
    }

    /// Switches fullscreen mode. Returns the new mode, or `None` if no fullscreen control is
    /// attached.
    pub fn toggle_fullscreen(&mut self) -> Option<bool> {
        let control = self
            .controls
            .iter_mut()
            .find_map(|control| control.as_any_mut().downcast_mut::<FullscreenControl>())?;

        let is_fullscreen = control.toggle();
        self.redraw();

        Some(is_fullscreen)
    }

    /// Returns true if the map is shown fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.control::<FullscreenControl>()
            .is_some_and(FullscreenControl::is_fullscreen)
    }

    /// URLs the renderer must fetch to draw the current view: the basemap first, then every
    /// visible overlay in order.
    pub fn requests(&self) -> Vec<String> {
        std::iter::once(self.basemap())
            .chain(self.overlay.iter_visible())
            .flat_map(|layer| layer.requests(&self.view, self.dpi_scale_factor))
            .collect()
    }

    /// Attributions of all layers of the map.
    pub fn attributions(&self) -> Vec<Attribution> {
        std::iter::once(self.basemap())
            .chain(self.overlay.iter())
            .filter_map(|layer| layer.attribution())
            .collect()
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Sets the new event messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::control::{ControlRegistry, ControlTarget, DEFAULT_OPACITY};
    use crate::layer::TestLayer;

    #[derive(Default, Clone)]
    struct CountingMessenger(Arc<AtomicUsize>);

    impl Messenger for CountingMessenger {
        fn request_redraw(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn test_map() -> Map {
        Map::new(
            MapView::default(),
            Box::new(TestLayer("basemap", 1.0)),
            None,
        )
    }

    #[test]
    fn basemap_is_requested_first() {
        let mut map = test_map();
        map.add_overlay(Box::new(TestLayer("overlay", 1.0)));

        assert_eq!(map.requests(), vec!["basemap", "overlay"]);
    }

    #[test]
    fn opacity_control_drives_target() {
        let mut map = test_map();
        let handle = map.add_overlay(Box::new(TestLayer("overlay", 1.0)));

        assert_eq!(map.set_overlay_opacity(0.5), None);

        let control = ControlRegistry::default()
            .get(
                "Opacity",
                &ControlTarget {
                    layer: handle,
                    opacity: None,
                },
            )
            .unwrap();
        map.add_control(control);
        assert_eq!(
            map.overlay().get(handle).map(|l| l.opacity()),
            Some(DEFAULT_OPACITY)
        );

        assert_eq!(map.set_overlay_opacity(2.0), Some(1.0));
        assert_eq!(map.overlay().get(handle).map(|l| l.opacity()), Some(1.0));
        assert_eq!(
            map.control::<OpacityControl>().map(|c| c.value()),
            Some(1.0)
        );
    }

    #[test]
    fn fullscreen_toggles() {
        let mut map = test_map();
        assert_eq!(map.toggle_fullscreen(), None);

        map.add_control(Box::new(FullscreenControl::default()));
        assert!(!map.is_fullscreen());
        assert_eq!(map.toggle_fullscreen(), Some(true));
        assert!(map.is_fullscreen());
        assert_eq!(map.toggle_fullscreen(), Some(false));
    }

    #[test]
    fn removing_overlay_drops_its_controls() {
        let mut map = test_map();
        let handle = map.add_overlay(Box::new(TestLayer("overlay", 1.0)));
        map.add_control(Box::new(OpacityControl::new(handle, 0.5)));
        map.add_control(Box::new(FullscreenControl::default()));

        assert!(map.remove_overlay(handle).is_some());
        assert_eq!(map.control_names(), vec!["Fullscreen"]);
        assert!(map.remove_overlay(handle).is_none());
    }

    #[test]
    fn changes_request_redraw() {
        let messenger = CountingMessenger::default();
        let mut map = test_map();
        map.set_messenger(Some(messenger.clone()));

        map.fit_bounds(&LatLngBounds::from_pairs([-30.0, -100.0], [30.0, 100.0]));
        map.add_overlay(Box::new(TestLayer("overlay", 1.0)));

        assert_eq!(messenger.0.load(Ordering::Relaxed), 2);
    }
}
