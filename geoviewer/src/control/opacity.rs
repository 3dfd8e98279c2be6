use std::any::Any;

use super::{Control, ControlPosition};
use crate::map::{LayerGroup, LayerHandle};

/// Opacity an overlay gets from the control when the layer has no configured opacity.
pub const DEFAULT_OPACITY: f32 = 0.75;

/// Slider changing the opacity of an overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityControl {
    target: LayerHandle,
    value: f32,
}

impl OpacityControl {
    /// Name of the control in the [`ControlRegistry`](super::ControlRegistry).
    pub const NAME: &'static str = "Opacity";

    /// Creates a control for the layer. The value is clamped to `[0, 1]`.
    pub fn new(target: LayerHandle, value: f32) -> Self {
        Self {
            target,
            value: value.clamp(0.0, 1.0),
        }
    }

    /// Current value of the slider.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Moves the slider and applies the new opacity to the target layer. Returns the value after
    /// clamping.
    pub fn set_value(&mut self, value: f32, overlay: &mut LayerGroup) -> f32 {
        self.value = value.clamp(0.0, 1.0);
        self.apply(overlay);
        self.value
    }

    fn apply(&self, overlay: &mut LayerGroup) {
        match overlay.get_mut(self.target) {
            Some(layer) => layer.set_opacity(self.value),
            None => log::warn!("Opacity control target {:?} is not in the overlay group", self.target),
        }
    }
}

impl Control for OpacityControl {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn position(&self) -> ControlPosition {
        ControlPosition::TopLeft
    }

    fn target(&self) -> Option<LayerHandle> {
        Some(self.target)
    }

    fn attach(&self, overlay: &mut LayerGroup) {
        self.apply(overlay);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
