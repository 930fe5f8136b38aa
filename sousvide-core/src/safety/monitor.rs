//! Safety monitor implementation
//!
//! Watches liquid presence, sensor health and over-temperature.

/// Conditions that forbid heating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Float switch reports no liquid; heater and pump must be off
    NotImmersed,
    /// No valid temperature reading
    SensorFault,
    /// Temperature at or above the cut-off
    OverTemperature,
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(Fault),
}

impl SafetyStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SafetyStatus::Ok)
    }
}

/// Safety monitor for fault detection
///
/// Stateless apart from the last reported status, which is kept only so
/// trips and recoveries are logged once.
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    /// Cut-off temperature (×10 for 0.1°C resolution)
    cutoff_x10: i16,
    last: SafetyStatus,
}

impl SafetyMonitor {
    /// Create a new safety monitor
    pub fn new(cutoff_x10: i16) -> Self {
        Self {
            cutoff_x10,
            last: SafetyStatus::Ok,
        }
    }

    /// Check all safety conditions
    ///
    /// Immersion is checked first; the other conditions only matter in
    /// liquid.
    pub fn check(&self, immersed: bool, temp_x10: Option<i16>) -> SafetyStatus {
        if !immersed {
            return SafetyStatus::Fault(Fault::NotImmersed);
        }

        match temp_x10 {
            None => SafetyStatus::Fault(Fault::SensorFault),
            Some(t) if t >= self.cutoff_x10 => SafetyStatus::Fault(Fault::OverTemperature),
            Some(_) => SafetyStatus::Ok,
        }
    }

    /// Check and remember the status, logging changes
    pub fn update(&mut self, immersed: bool, temp_x10: Option<i16>) -> SafetyStatus {
        let status = self.check(immersed, temp_x10);
        if status != self.last {
            match status {
                SafetyStatus::Fault(fault) => warn!("safety trip: {}", fault),
                SafetyStatus::Ok => info!("safety conditions normal"),
            }
            self.last = status;
        }
        status
    }

    /// Status from the last [`update`](Self::update)
    pub fn last_status(&self) -> SafetyStatus {
        self.last
    }
}
