//! Interrupt-level millisecond tick and status shared with it
//!
//! The timer interrupt is the only code outside the main loop. It advances
//! [`TickSource`]; the loop reads it through [`Clock`]. [`SharedStatus`]
//! goes the other way so interrupt handlers can see whether heating is
//! permitted.

use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::clock::Clock;
use crate::state::OperatingState;

/// Default tick period of the board timer
pub const TICK_INTERVAL_MS: u32 = 1;

/// Wrapping millisecond counter advanced from a timer interrupt
pub struct TickSource {
    millis: AtomicU32,
    period_ms: u32,
}

impl TickSource {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            millis: AtomicU32::new(0),
            period_ms,
        }
    }

    /// Call from the timer interrupt once per period
    pub fn on_interrupt(&self) {
        self.millis.fetch_add(self.period_ms, Ordering::Relaxed);
    }

    /// Advance by an arbitrary amount (simulation, catch-up after sleep)
    pub fn advance(&self, ms: u32) {
        self.millis.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

impl Clock for TickSource {
    fn now_ms(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }
}

/// Operating state published by the loop for interrupt handlers
pub struct SharedStatus {
    state: AtomicU8,
    heater_allowed: AtomicBool,
}

impl SharedStatus {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(OperatingState::Off as u8),
            heater_allowed: AtomicBool::new(false),
        }
    }

    /// Publish the state at the end of a loop iteration
    pub fn publish(&self, state: OperatingState, heater_allowed: bool) {
        self.state.store(state.as_u8(), Ordering::Release);
        self.heater_allowed.store(heater_allowed, Ordering::Release);
    }

    pub fn state(&self) -> OperatingState {
        OperatingState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the last iteration left the heater permitted to run
    pub fn heater_allowed(&self) -> bool {
        self.heater_allowed.load(Ordering::Acquire)
    }
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_wraps() {
        let tick = TickSource::new(1);
        tick.advance(u32::MAX);
        assert_eq!(tick.now_ms(), u32::MAX);
        tick.on_interrupt();
        assert_eq!(tick.now_ms(), 0);
    }

    #[test]
    fn test_tick_period() {
        let tick = TickSource::new(10);
        for _ in 0..5 {
            tick.on_interrupt();
        }
        assert_eq!(tick.now_ms(), 50);
    }

    #[test]
    fn test_shared_status() {
        static STATUS: SharedStatus = SharedStatus::new();
        assert_eq!(STATUS.state(), OperatingState::Off);
        assert!(!STATUS.heater_allowed());

        STATUS.publish(OperatingState::MenuPreset, true);
        assert_eq!(STATUS.state(), OperatingState::MenuPreset);
        assert!(STATUS.heater_allowed());
    }
}
