//! Controller tunables

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PID gains (value × 1000, per °C of error)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PidTunings {
    pub kp_x1000: i32,
    pub ki_x1000: i32,
    pub kd_x1000: i32,
}

impl Default for PidTunings {
    fn default() -> Self {
        Self {
            kp_x1000: 850_000, // 850
            ki_x1000: 500,     // 0.5
            kd_x1000: 100,     // 0.1
        }
    }
}

/// All runtime tunables of the control core
///
/// Durations are in milliseconds, temperatures in tenths of a degree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Idle time before the display backlight goes off
    pub backlight_timeout_ms: u32,
    /// Idle time before an open menu falls back to the default screen
    pub menu_return_timeout_ms: u32,
    /// Minimum spacing of button handling and display writes
    pub action_interval_ms: u32,
    /// Period of alternating display messages
    pub rotation_interval_ms: u32,
    /// Lowest selectable target temperature
    pub min_temp_x10: i16,
    /// Highest selectable target temperature
    pub max_temp_x10: i16,
    /// Hold polls after which the edit step grows to 1.0 °C
    pub hold_medium_polls: u16,
    /// Hold polls after which the edit step grows to 2.0 °C
    pub hold_long_polls: u16,
    /// Sensor resolution in bits (9 to 12)
    pub resolution_bits: u8,
    /// Heater is cut at or above this temperature
    pub cutoff_temp_x10: i16,
    /// Target temperature used until one is committed
    pub default_setpoint_x10: i16,
    pub pid: PidTunings,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            backlight_timeout_ms: 20_000,
            menu_return_timeout_ms: 30_000,
            action_interval_ms: 150,
            rotation_interval_ms: 2_000,
            min_temp_x10: 100,
            max_temp_x10: 850,
            hold_medium_polls: 10,
            hold_long_polls: 25,
            resolution_bits: 11,
            cutoff_temp_x10: 950,
            default_setpoint_x10: 600,
            pid: PidTunings::default(),
        }
    }
}

impl ControllerConfig {
    /// Clamp a target temperature into the selectable range
    pub fn clamp_setpoint(&self, temp_x10: i16) -> i16 {
        temp_x10.clamp(self.min_temp_x10, self.max_temp_x10)
    }

    /// Edit step for a hold count, in tenths of a degree
    ///
    /// `hold` is the count after the current poll was accounted for.
    pub fn edit_step_x10(&self, hold: u16) -> i16 {
        if hold > self.hold_long_polls {
            20
        } else if hold > self.hold_medium_polls {
            10
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.backlight_timeout_ms, 20_000);
        assert_eq!(config.menu_return_timeout_ms, 30_000);
        assert_eq!(config.min_temp_x10, 100);
        assert_eq!(config.max_temp_x10, 850);
        assert_eq!(config.resolution_bits, 11);
    }

    #[test]
    fn test_clamp_setpoint() {
        let config = ControllerConfig::default();
        assert_eq!(config.clamp_setpoint(900), 850);
        assert_eq!(config.clamp_setpoint(50), 100);
        assert_eq!(config.clamp_setpoint(615), 615);
    }

    #[test]
    fn test_edit_steps() {
        let config = ControllerConfig::default();
        assert_eq!(config.edit_step_x10(1), 1);
        assert_eq!(config.edit_step_x10(10), 1);
        assert_eq!(config.edit_step_x10(11), 10);
        assert_eq!(config.edit_step_x10(25), 10);
        assert_eq!(config.edit_step_x10(26), 20);
    }
}
