//! Actuator and control-law traits

/// Heater output with proportional effort
///
/// Implementations drive the solid state relay, typically through PWM.
pub trait HeaterOutput {
    /// Set the heating effort (0 = off, 255 = full power)
    fn set_effort(&mut self, effort: u8);

    /// Effort currently applied
    fn effort(&self) -> u8;
}

/// Circulation pump relay
pub trait PumpOutput {
    fn set_enabled(&mut self, on: bool);

    fn is_enabled(&self) -> bool;
}

/// Closed-loop control law
///
/// The numeric algorithm lives outside the core; the core only feeds it
/// measurements and clamps what comes back.
pub trait EffortController {
    /// Compute an unclamped effort from a measurement and a target
    ///
    /// Both temperatures are in tenths of a degree.
    fn compute(&mut self, input_x10: i16, setpoint_x10: i16) -> i32;

    /// Drop accumulated state (integral, previous error)
    fn reset(&mut self);
}
