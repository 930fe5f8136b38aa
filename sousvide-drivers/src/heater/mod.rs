//! Heater control law and output

pub mod fixed;
pub mod pid;
pub mod pwm;

pub use pid::{PidCoefficients, PidConfig, PidEffort};
pub use pwm::PwmHeater;
