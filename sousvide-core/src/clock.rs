//! Interval gates over a wrapping millisecond clock
//!
//! Every wait in the main loop is expressed as "has enough time elapsed
//! since the last reset". Elapsed time is computed with wrapping
//! subtraction, so the gates keep working when the 32-bit millisecond
//! counter rolls over after roughly 49.7 days.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// A single elapsed-time gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    last_ms: u32,
}

impl IntervalTimer {
    /// Create a gate that was last reset at `now_ms`
    pub const fn new(now_ms: u32) -> Self {
        Self { last_ms: now_ms }
    }

    /// Time since the last reset
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_ms)
    }

    /// True once strictly more than `threshold_ms` has elapsed
    pub fn due(&self, now_ms: u32, threshold_ms: u32) -> bool {
        self.elapsed(now_ms) > threshold_ms
    }

    /// Restart the interval at `now_ms`
    pub fn reset(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    /// Reset and return true if due, otherwise leave untouched
    pub fn run_if_due(&mut self, now_ms: u32, threshold_ms: u32) -> bool {
        if self.due(now_ms, threshold_ms) {
            self.reset(now_ms);
            true
        } else {
            false
        }
    }
}

/// The loop's independent gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Last user button press; drives backlight and menu-return timeouts
    ButtonActivity,
    /// Last throttled action (button handling, display writes)
    Action,
    /// Last alternating-message rotation
    Rotation,
    /// Last temperature conversion request
    Conversion,
}

impl TimerId {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            TimerId::ButtonActivity => 0,
            TimerId::Action => 1,
            TimerId::Rotation => 2,
            TimerId::Conversion => 3,
        }
    }
}

/// All gates, indexed by [`TimerId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timers {
    gates: [IntervalTimer; TimerId::COUNT],
}

impl Timers {
    /// All gates reset at `now_ms`
    pub const fn new(now_ms: u32) -> Self {
        Self {
            gates: [IntervalTimer::new(now_ms); TimerId::COUNT],
        }
    }

    /// Time since `id` was last reset
    pub fn elapsed(&self, id: TimerId, now_ms: u32) -> u32 {
        self.gates[id.index()].elapsed(now_ms)
    }

    /// True once strictly more than `threshold_ms` has elapsed on `id`
    pub fn due(&self, id: TimerId, now_ms: u32, threshold_ms: u32) -> bool {
        self.gates[id.index()].due(now_ms, threshold_ms)
    }

    /// Restart `id` at `now_ms`
    pub fn reset(&mut self, id: TimerId, now_ms: u32) {
        self.gates[id.index()].reset(now_ms);
    }

    /// Reset `id` and return true if it was due
    pub fn run_if_due(&mut self, id: TimerId, now_ms: u32, threshold_ms: u32) -> bool {
        self.gates[id.index()].run_if_due(now_ms, threshold_ms)
    }
}
