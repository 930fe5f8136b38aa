//! Button panel on discrete inputs
//!
//! Four menu buttons and the liquid-level float switch. Debouncing comes
//! from the loop polling at the action cadence, not from here.

use sousvide_core::traits::ButtonPanel;
use sousvide_core::ButtonEvent;
use sousvide_hal::InputPin;

/// Electrical polarity of the inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelPolarity {
    /// Buttons read HIGH while pressed
    pub pressed_high: bool,
    /// Float switch reads HIGH while the device is in liquid
    pub liquid_high: bool,
}

impl Default for PanelPolarity {
    /// Buttons with pull-downs; float switch that opens in liquid
    fn default() -> Self {
        Self {
            pressed_high: true,
            liquid_high: false,
        }
    }
}

/// Input pins of the panel
pub struct PanelPins<P> {
    pub back: P,
    pub ok: P,
    pub down: P,
    pub up: P,
    pub float_switch: P,
}

pub struct GpioButtonPanel<P> {
    pins: PanelPins<P>,
    polarity: PanelPolarity,
}

impl<P: InputPin> GpioButtonPanel<P> {
    pub fn new(pins: PanelPins<P>, polarity: PanelPolarity) -> Self {
        Self { pins, polarity }
    }

    pub fn into_pins(self) -> PanelPins<P> {
        self.pins
    }
}

impl<P: InputPin> ButtonPanel for GpioButtonPanel<P> {
    fn read(&mut self) -> ButtonEvent {
        let pressed = self.polarity.pressed_high;
        let mut event = ButtonEvent::NONE;
        event.set(ButtonEvent::BACK, self.pins.back.is_high() == pressed);
        event.set(ButtonEvent::OK, self.pins.ok.is_high() == pressed);
        event.set(ButtonEvent::DOWN, self.pins.down.is_high() == pressed);
        event.set(ButtonEvent::UP, self.pins.up.is_high() == pressed);
        event.set(
            ButtonEvent::LIQUID_PRESENT,
            self.pins.float_switch.is_high() == self.polarity.liquid_high,
        );
        event
    }
}
