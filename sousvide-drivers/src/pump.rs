//! Circulation pump relay

use sousvide_core::traits::PumpOutput;
use sousvide_hal::OutputPin;

/// Pump switched by a relay on a digital output
///
/// Relay boards are commonly active-low: the coil pulls in when the pin
/// is driven LOW.
pub struct RelayPump<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> RelayPump<P> {
    /// Wrap the relay pin; the pump starts off
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut pump = Self {
            pin,
            active_low,
            on: false,
        };
        pump.set_enabled(false);
        pump
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> PumpOutput for RelayPump<P> {
    fn set_enabled(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.active_low);
    }

    fn is_enabled(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_low_relay() {
        let mut pump = RelayPump::new_active_low(MockPin { high: false });
        assert!(!pump.is_enabled());
        assert!(pump.pin().is_set_high());

        pump.set_enabled(true);
        assert!(pump.is_enabled());
        assert!(pump.pin().is_set_low());
    }

    #[test]
    fn test_active_high_relay() {
        let mut pump = RelayPump::new(MockPin { high: true }, false);
        assert!(pump.pin().is_set_low());
        pump.set_enabled(true);
        assert!(pump.pin().is_set_high());
    }
}
