//! Front-panel buttons and float switch

use crate::input::ButtonEvent;

/// Source of button samples
pub trait ButtonPanel {
    /// Sample all buttons and the liquid-level switch at once
    fn read(&mut self) -> ButtonEvent;
}
