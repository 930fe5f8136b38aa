//! Heater and pump command computation
//!
//! The only producer of actuator commands. The immersion interlock is
//! evaluated before the control law is even consulted, so a dry device
//! never depends on the controller's internal state.

use crate::safety::{Fault, SafetyMonitor, SafetyStatus};
use crate::state::OperatingState;
use crate::traits::EffortController;

/// Heater effort and pump state to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    /// 0 = off, 255 = full power
    pub heater_effort: u8,
    pub pump_enabled: bool,
}

impl ActuatorCommand {
    /// Everything off
    pub const OFF: Self = Self {
        heater_effort: 0,
        pump_enabled: false,
    };

    /// Pump running, heater off
    pub const CIRCULATE: Self = Self {
        heater_effort: 0,
        pump_enabled: true,
    };
}

/// Closed-loop controller wrapping a control law
pub struct ClosedLoopController<E> {
    law: E,
    safety: SafetyMonitor,
    /// Control law has state worth resetting
    engaged: bool,
}

impl<E: EffortController> ClosedLoopController<E> {
    pub fn new(law: E, cutoff_x10: i16) -> Self {
        Self {
            law,
            safety: SafetyMonitor::new(cutoff_x10),
            engaged: false,
        }
    }

    /// Compute the actuator command for one control tick
    pub fn update(
        &mut self,
        state: OperatingState,
        immersed: bool,
        current_x10: Option<i16>,
        desired_x10: i16,
    ) -> ActuatorCommand {
        if !immersed {
            self.safety.update(false, current_x10);
            self.disengage();
            return ActuatorCommand::OFF;
        }

        if !state.heater_allowed() {
            self.disengage();
            return ActuatorCommand::OFF;
        }

        let temp_x10 = match self.safety.update(true, current_x10) {
            SafetyStatus::Ok => match current_x10 {
                Some(t) => t,
                None => return ActuatorCommand::CIRCULATE,
            },
            SafetyStatus::Fault(Fault::NotImmersed) => {
                self.disengage();
                return ActuatorCommand::OFF;
            }
            SafetyStatus::Fault(Fault::SensorFault | Fault::OverTemperature) => {
                self.disengage();
                return ActuatorCommand::CIRCULATE;
            }
        };

        self.engaged = true;
        let effort = self.law.compute(temp_x10, desired_x10).clamp(0, 255) as u8;

        ActuatorCommand {
            heater_effort: effort,
            pump_enabled: true,
        }
    }

    /// Force the controller idle, e.g. on turn-off or shutdown
    pub fn disengage(&mut self) {
        if self.engaged {
            self.law.reset();
            self.engaged = false;
        }
    }

    pub fn safety(&self) -> &SafetyMonitor {
        &self.safety
    }

    pub fn law(&self) -> &E {
        &self.law
    }
}
