//! GPIO pin abstractions
//!
//! Provides traits for digital input, digital output and PWM pins, plus
//! adapters that lift `embedded-hal` 1.0 pins into them.

use embedded_hal::digital;
use embedded_hal::pwm::SetDutyCycle;

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Reading takes `&mut self` because many port implementations latch or
/// clear state on read.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// PWM-capable output with an 8-bit duty cycle
///
/// `0` is fully off, `255` is fully on.
pub trait PwmPin {
    /// Set the duty cycle
    fn set_duty(&mut self, duty: u8);

    /// Get the last duty cycle written
    fn duty(&self) -> u8;
}

/// Adapter for an `embedded-hal` input pin
///
/// `embedded-hal` reads are fallible. A failed read reports
/// `fallback_high` so boards can pick the level that is safe for the
/// signal (for the liquid switch that is "no liquid").
pub struct EhInput<P> {
    pin: P,
    fallback_high: bool,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap a pin, reporting `fallback_high` when a read fails
    pub fn new(pin: P, fallback_high: bool) -> Self {
        Self { pin, fallback_high }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(self.fallback_high)
    }
}

/// Adapter for an `embedded-hal` output pin
///
/// Tracks the last commanded level because `embedded-hal` output pins are
/// not required to be readable.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap a pin and drive it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self {
            pin,
            high: !initial_high,
        };
        out.set_state(initial_high);
        out
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        // Errors from infallible GPIO ports are unreachable; a failing
        // expander leaves the cached level untouched so it is retried.
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Adapter for an `embedded-hal` PWM channel
pub struct EhPwm<P> {
    channel: P,
    duty: u8,
}

impl<P: SetDutyCycle> EhPwm<P> {
    /// Wrap a PWM channel and start it fully off
    pub fn new(channel: P) -> Self {
        let mut pwm = Self { channel, duty: 1 };
        pwm.set_duty(0);
        pwm
    }
}

impl<P: SetDutyCycle> PwmPin for EhPwm<P> {
    fn set_duty(&mut self, duty: u8) {
        if self
            .channel
            .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
            .is_ok()
        {
            self.duty = duty;
        }
    }

    fn duty(&self) -> u8 {
        self.duty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BrokenPin;

    impl embedded_hal::digital::Error for BrokenPin {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    struct MockInput {
        level: Result<bool, BrokenPin>,
    }

    impl digital::ErrorType for MockInput {
        type Error = BrokenPin;
    }

    impl digital::InputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.level
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.level.map(|high| !high)
        }
    }

    struct MockOutput {
        high: bool,
    }

    impl digital::ErrorType for MockOutput {
        type Error = Infallible;
    }

    impl digital::OutputPin for MockOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    struct MockPwm {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_input_reads_level() {
        let mut pin = EhInput::new(MockInput { level: Ok(true) }, false);
        assert!(pin.is_high());
        assert!(!pin.is_low());
    }

    #[test]
    fn test_input_failure_uses_fallback() {
        let mut safe_high = EhInput::new(MockInput { level: Err(BrokenPin) }, true);
        assert!(safe_high.is_high());

        let mut safe_low = EhInput::new(MockInput { level: Err(BrokenPin) }, false);
        assert!(safe_low.is_low());
    }

    #[test]
    fn test_output_tracks_level() {
        let mut pin = EhOutput::new(MockOutput { high: false }, true);
        assert!(pin.is_set_high());
        assert!(pin.pin.high);

        pin.set_low();
        assert!(pin.is_set_low());
        assert!(!pin.pin.high);

        pin.set_state(true);
        assert!(pin.pin.high);
    }

    #[test]
    fn test_pwm_scales_duty() {
        let mut pwm = EhPwm::new(MockPwm { duty: 500 });
        assert_eq!(pwm.duty(), 0);
        assert_eq!(pwm.channel.duty, 0);

        pwm.set_duty(255);
        assert_eq!(pwm.duty(), 255);
        assert_eq!(pwm.channel.duty, 1000);

        pwm.set_duty(51);
        assert_eq!(pwm.channel.duty, 200);
    }
}
