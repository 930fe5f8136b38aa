//! PWM heater output
//!
//! Drives the heating element through a solid state relay on a
//! PWM-capable pin. Effort maps 1:1 onto the 8-bit duty cycle.

use sousvide_core::traits::HeaterOutput;
use sousvide_hal::PwmPin;

pub struct PwmHeater<P> {
    pin: P,
    /// If true, full effort = duty 0 (active-low SSR input)
    inverted: bool,
    effort: u8,
}

impl<P: PwmPin> PwmHeater<P> {
    /// Wrap a PWM pin; the heater starts off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut heater = Self {
            pin,
            inverted,
            effort: 0,
        };
        heater.set_effort(0);
        heater
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: PwmPin> HeaterOutput for PwmHeater<P> {
    fn set_effort(&mut self, effort: u8) {
        self.effort = effort;
        let duty = if self.inverted { u8::MAX - effort } else { effort };
        if self.pin.duty() != duty {
            self.pin.set_duty(duty);
        }
    }

    fn effort(&self) -> u8 {
        self.effort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPwm {
        duty: u8,
        writes: u32,
    }

    impl PwmPin for MockPwm {
        fn set_duty(&mut self, duty: u8) {
            self.duty = duty;
            self.writes += 1;
        }

        fn duty(&self) -> u8 {
            self.duty
        }
    }

    #[test]
    fn test_starts_off() {
        let heater = PwmHeater::new(MockPwm { duty: 200, writes: 0 }, false);
        assert_eq!(heater.effort(), 0);
        assert_eq!(heater.pin().duty, 0);
    }

    #[test]
    fn test_inverted() {
        let mut heater = PwmHeater::new(MockPwm { duty: 0, writes: 0 }, true);
        assert_eq!(heater.pin().duty, 255);
        heater.set_effort(255);
        assert_eq!(heater.pin().duty, 0);
        assert_eq!(heater.effort(), 255);
    }

    #[test]
    fn test_skips_redundant_writes() {
        let mut heater = PwmHeater::new(MockPwm { duty: 0, writes: 0 }, false);
        heater.set_effort(128);
        heater.set_effort(128);
        assert_eq!(heater.pin().writes, 1);
    }
}
