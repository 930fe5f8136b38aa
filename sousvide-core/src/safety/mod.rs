//! Safety monitoring
//!
//! Detects conditions under which the heater must not run.

pub mod monitor;

pub use monitor::{Fault, SafetyMonitor, SafetyStatus};
