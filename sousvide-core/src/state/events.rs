//! Menu events derived from a button sample

use crate::input::ButtonEvent;

/// A single navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    Back,
    Ok,
    Up,
    Down,
}

impl MenuEvent {
    /// Pick the event for one button sample
    ///
    /// When several buttons are held, BACK wins over OK, OK over UP and UP
    /// over DOWN. The liquid-level flag never produces an event.
    pub fn from_buttons(buttons: ButtonEvent) -> Option<Self> {
        if buttons.contains(ButtonEvent::BACK) {
            Some(MenuEvent::Back)
        } else if buttons.contains(ButtonEvent::OK) {
            Some(MenuEvent::Ok)
        } else if buttons.contains(ButtonEvent::UP) {
            Some(MenuEvent::Up)
        } else if buttons.contains(ButtonEvent::DOWN) {
            Some(MenuEvent::Down)
        } else {
            None
        }
    }

    /// UP or DOWN
    pub fn is_adjust(&self) -> bool {
        matches!(self, MenuEvent::Up | MenuEvent::Down)
    }
}
