//! Interactive map controls and the registry that creates them by name.

use std::any::Any;
use std::collections::HashMap;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::ViewerError;
use crate::map::{LayerGroup, LayerHandle};

mod fullscreen;
mod opacity;

pub use fullscreen::FullscreenControl;
pub use opacity::{OpacityControl, DEFAULT_OPACITY};

/// Corner of the map a control is placed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ControlPosition {
    /// Top left corner.
    #[default]
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

/// Overlay layer a control is created for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlTarget {
    /// Handle of the layer in the overlay group.
    pub layer: LayerHandle,
    /// Opacity the layer was configured with, if any.
    pub opacity: Option<f32>,
}

/// Interactive element attached to the map.
pub trait Control: MaybeSend + MaybeSync {
    /// Name the control is registered with.
    fn name(&self) -> &str;
    /// Where the control is placed on the map.
    fn position(&self) -> ControlPosition;
    /// Overlay layer the control operates on. `None` for map-wide controls.
    fn target(&self) -> Option<LayerHandle> {
        None
    }
    /// Called once when the control is added to the map.
    fn attach(&self, _overlay: &mut LayerGroup) {}
    /// Map stores controls as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Map stores controls as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type ControlConstructor = Box<dyn Fn(&ControlTarget) -> Box<dyn Control> + Send + Sync>;

/// Lookup table of control constructors keyed by the control name.
///
/// The default registry knows `Opacity` and `Fullscreen`.
pub struct ControlRegistry {
    constructors: HashMap<String, ControlConstructor>,
}

impl ControlRegistry {
    /// Creates a registry without any controls.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers a control constructor, replacing the one with the same name if any.
    pub fn with_control(
        mut self,
        name: impl Into<String>,
        constructor: impl Fn(&ControlTarget) -> Box<dyn Control> + Send + Sync + 'static,
    ) -> Self {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }

    /// Creates the control with the given name bound to the target.
    pub fn get(&self, name: &str, target: &ControlTarget) -> Result<Box<dyn Control>, ViewerError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ViewerError::UnrecognizedControl(name.to_string()))?;

        Ok(constructor(target))
    }

    /// Returns true if a control with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Sorted names of all registered controls.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::empty()
            .with_control(OpacityControl::NAME, opacity_control)
            .with_control(FullscreenControl::NAME, fullscreen_control)
    }
}

fn opacity_control(target: &ControlTarget) -> Box<dyn Control> {
    Box::new(OpacityControl::new(
        target.layer,
        target.opacity.unwrap_or(DEFAULT_OPACITY),
    ))
}

fn fullscreen_control(_target: &ControlTarget) -> Box<dyn Control> {
    Box::new(FullscreenControl::default())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::layer::TestLayer;

    fn target() -> ControlTarget {
        let mut group = LayerGroup::default();
        ControlTarget {
            layer: group.push(TestLayer("overlay", 1.0)),
            opacity: None,
        }
    }

    #[test]
    fn default_registry() {
        assert_eq!(ControlRegistry::default().names(), vec!["Fullscreen", "Opacity"]);
    }

    #[test]
    fn opacity_is_bound_to_target() {
        let target = target();
        let control = ControlRegistry::default().get("Opacity", &target).unwrap();

        assert_eq!(control.name(), "Opacity");
        assert_eq!(control.target(), Some(target.layer));
        let control = control.as_any().downcast_ref::<OpacityControl>().unwrap();
        assert_eq!(control.value(), DEFAULT_OPACITY);
    }

    #[test]
    fn opacity_starts_at_configured_value() {
        let target = ControlTarget {
            opacity: Some(0.4),
            ..target()
        };
        let control = ControlRegistry::default().get("Opacity", &target).unwrap();
        let control = control.as_any().downcast_ref::<OpacityControl>().unwrap();
        assert_eq!(control.value(), 0.4);
    }

    #[test]
    fn fullscreen_is_map_wide() {
        let control = ControlRegistry::default()
            .get("Fullscreen", &target())
            .unwrap();

        assert_eq!(control.position(), ControlPosition::TopRight);
        assert_eq!(control.target(), None);
    }

    #[test]
    fn unknown_control() {
        assert_matches!(
            ControlRegistry::default().get("Legend", &target()).err(),
            Some(ViewerError::UnrecognizedControl(name)) if name == "Legend"
        );
        assert!(!ControlRegistry::default().contains("opacity"));
    }
}
