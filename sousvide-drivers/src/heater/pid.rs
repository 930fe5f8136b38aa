//! PID control law
//!
//! Turns the temperature error into a heater effort in `0..=255`. Gains
//! are per degree Celsius; the loop hands temperatures over in tenths.
//! Uses fixed-point math so the same code runs on parts without an FPU.

use super::fixed::Fixed32;
use sousvide_core::config::PidTunings;
use sousvide_core::traits::EffortController;

/// Full-scale heater effort
const EFFORT_MAX: i32 = 255;

/// PID coefficients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidCoefficients {
    /// Proportional gain (Kp)
    pub kp: Fixed32,
    /// Integral gain (Ki)
    pub ki: Fixed32,
    /// Derivative gain (Kd)
    pub kd: Fixed32,
}

impl PidCoefficients {
    /// Create coefficients from scaled integers (value × 1000)
    pub const fn from_scaled_1000(kp_x1000: i32, ki_x1000: i32, kd_x1000: i32) -> Self {
        Self {
            kp: Fixed32::from_scaled_1000(kp_x1000),
            ki: Fixed32::from_scaled_1000(ki_x1000),
            kd: Fixed32::from_scaled_1000(kd_x1000),
        }
    }

    /// Check if any coefficient is non-zero
    pub fn is_configured(&self) -> bool {
        !self.kp.is_zero() || !self.ki.is_zero() || !self.kd.is_zero()
    }
}

impl From<PidTunings> for PidCoefficients {
    fn from(t: PidTunings) -> Self {
        Self::from_scaled_1000(t.kp_x1000, t.ki_x1000, t.kd_x1000)
    }
}

/// PID configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidConfig {
    pub coefficients: PidCoefficients,
    /// Integral windup limit, in effort units
    pub integral_limit: i32,
    /// Errors up to this size (°C × 10) count as zero
    pub deadband_x10: i16,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            coefficients: PidTunings::default().into(),
            integral_limit: EFFORT_MAX,
            deadband_x10: 0,
        }
    }
}

/// PID state between two computations
#[derive(Debug, Clone, Copy, Default)]
struct PidState {
    integral: Fixed32,
    /// `None` until the first computation after a reset
    prev_error_x10: Option<i16>,
}

/// PID effort controller
///
/// The derivative acts on the error; the first computation after a reset
/// has no derivative term so a fresh start does not kick.
pub struct PidEffort {
    config: PidConfig,
    state: PidState,
    last_output: i32,
}

impl PidEffort {
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            state: PidState::default(),
            last_output: 0,
        }
    }

    /// Controller with the given tunings and default limits
    pub fn from_tunings(tunings: PidTunings) -> Self {
        Self::new(PidConfig {
            coefficients: tunings.into(),
            ..PidConfig::default()
        })
    }

    /// Replace the coefficients; resets the accumulated state
    pub fn set_coefficients(&mut self, coefficients: PidCoefficients) {
        self.config.coefficients = coefficients;
        self.reset();
    }

    pub fn coefficients(&self) -> &PidCoefficients {
        &self.config.coefficients
    }

    /// Last computed effort, before the caller's clamp
    pub fn last_output(&self) -> i32 {
        self.last_output
    }

    /// Accumulated integral term, in effort units
    pub fn integral(&self) -> i32 {
        self.state.integral.to_int()
    }
}

impl EffortController for PidEffort {
    fn compute(&mut self, input_x10: i16, setpoint_x10: i16) -> i32 {
        let error_x10 = setpoint_x10.saturating_sub(input_x10);
        let error_x10 = if error_x10.saturating_abs() <= self.config.deadband_x10 {
            0
        } else {
            error_x10
        };

        let error = Fixed32::from_tenths(error_x10);
        let coeffs = &self.config.coefficients;

        let p_term = coeffs.kp.mul(error);

        let limit = Fixed32::from_int(self.config.integral_limit);
        self.state.integral = self
            .state
            .integral
            .saturating_add(coeffs.ki.mul(error))
            .clamp(-limit, limit);

        let d_term = match self.state.prev_error_x10 {
            Some(prev) => coeffs
                .kd
                .mul(Fixed32::from_tenths(error_x10.saturating_sub(prev))),
            None => Fixed32::ZERO,
        };
        self.state.prev_error_x10 = Some(error_x10);

        let output = p_term
            .saturating_add(self.state.integral)
            .saturating_add(d_term);

        self.last_output = output.to_int().clamp(-EFFORT_MAX, EFFORT_MAX);
        self.last_output
    }

    fn reset(&mut self) {
        self.state = PidState::default();
        self.last_output = 0;
    }
}
