//! Controller context
//!
//! All mutable control state lives in one struct that is passed by
//! reference to every component. There are no process-wide singletons.

use crate::clock::Timers;
use crate::config::{ControllerConfig, NetworkConfig, PRESETS};
use crate::control::ActuatorCommand;
use crate::input::{ButtonEvent, HoldCounter};
use crate::state::OperatingState;

/// Desired temperature and the in-progress edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetpointState {
    /// Accepted target temperature (×10)
    desired_x10: i16,
    /// Edit buffer, meaningful only while editing (×10)
    temporary_x10: i16,
}

impl SetpointState {
    pub fn new(desired_x10: i16) -> Self {
        Self {
            desired_x10,
            temporary_x10: desired_x10,
        }
    }

    pub fn desired_x10(&self) -> i16 {
        self.desired_x10
    }

    pub fn temporary_x10(&self) -> i16 {
        self.temporary_x10
    }

    /// Start editing from the accepted value
    pub fn begin_edit(&mut self) {
        self.temporary_x10 = self.desired_x10;
    }

    /// Move the edit buffer by `delta_x10`, clamped to the selectable range
    pub fn adjust(&mut self, delta_x10: i16, config: &ControllerConfig) {
        let next = self.temporary_x10.saturating_add(delta_x10);
        self.temporary_x10 = config.clamp_setpoint(next);
    }

    /// Accept the edit buffer and return the new target
    pub fn commit(&mut self) -> i16 {
        self.desired_x10 = self.temporary_x10;
        self.desired_x10
    }

    /// Abandon the edit buffer
    pub fn discard(&mut self) {
        self.temporary_x10 = self.desired_x10;
    }

    /// Replace the target directly (preset, restored value)
    pub fn set_desired(&mut self, desired_x10: i16) {
        self.desired_x10 = desired_x10;
        self.temporary_x10 = desired_x10;
    }
}

/// Shared mutable state of the control core
#[derive(Debug, Clone)]
pub struct ControllerContext {
    /// Current operating state
    pub op_state: OperatingState,
    /// State the display was last drawn for; `None` forces a redraw
    pub prev_op_state: Option<OperatingState>,
    pub setpoint: SetpointState,
    /// Polls UP/DOWN have been held
    pub hold: HoldCounter,
    /// Highlighted entry of the preset list
    pub preset_cursor: usize,
    /// Alternating-message counter
    pub rotation: u32,
    pub timers: Timers,
    /// This iteration's button sample
    pub buttons: ButtonEvent,
    /// Cached network configuration
    pub network: NetworkConfig,
    /// Link state seen in the previous iteration
    pub link_up: bool,
    /// Last command applied to heater and pump
    pub command: ActuatorCommand,
}

impl ControllerContext {
    /// Boot state: device off, every timer started at `now_ms`
    pub fn new(now_ms: u32, desired_x10: i16, network: NetworkConfig) -> Self {
        Self {
            op_state: OperatingState::Off,
            prev_op_state: None,
            setpoint: SetpointState::new(desired_x10),
            hold: HoldCounter::new(),
            preset_cursor: 0,
            rotation: 0,
            timers: Timers::new(now_ms),
            buttons: ButtonEvent::NONE,
            network,
            link_up: false,
            command: ActuatorCommand::OFF,
        }
    }

    /// Check the immersion flag of this iteration's sample
    pub fn immersed(&self) -> bool {
        self.buttons.immersed()
    }

    /// Enter the terminal state
    pub fn enter_unknown(&mut self) {
        if self.op_state != OperatingState::Unknown {
            error!("control state corrupted ({}), shutting down", self.op_state);
            self.op_state = OperatingState::Unknown;
        }
    }

    /// Step the preset cursor forward or backward with wrap-around
    pub fn step_preset(&mut self, forward: bool) {
        let len = PRESETS.len();
        if len == 0 {
            return;
        }
        self.preset_cursor = if forward {
            (self.preset_cursor + 1) % len
        } else {
            (self.preset_cursor + len - 1) % len
        };
    }
}
