use std::any::Any;

use super::{Control, ControlPosition};

/// Button switching the map in and out of fullscreen mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FullscreenControl {
    toggled: bool,
}

impl FullscreenControl {
    /// Name of the control in the [`ControlRegistry`](super::ControlRegistry).
    pub const NAME: &'static str = "Fullscreen";

    /// Returns true if the map is shown fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.toggled
    }

    /// Switches the mode and returns the new one.
    pub fn toggle(&mut self) -> bool {
        self.toggled = !self.toggled;
        self.toggled
    }
}

impl Control for FullscreenControl {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn position(&self) -> ControlPosition {
        ControlPosition::TopRight
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
