//! Button and liquid-level sample
//!
//! The four front-panel buttons and the float switch are read together
//! into one [`ButtonEvent`] per loop iteration. Every decision in that
//! iteration uses the same sample.

use core::ops::BitOr;

/// Bitmask of the buttons and the liquid-level flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent(u8);

impl ButtonEvent {
    pub const NONE: Self = Self(0);
    pub const BACK: Self = Self(1 << 0);
    pub const OK: Self = Self(1 << 1);
    pub const DOWN: Self = Self(1 << 2);
    pub const UP: Self = Self(1 << 3);
    /// Float switch reports liquid around the device
    pub const LIQUID_PRESENT: Self = Self(1 << 4);

    const BUTTONS: u8 = 0b0_1111;
    const ALL: u8 = 0b1_1111;

    /// Build from raw bits; undefined bits are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check that every flag of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set or clear the flags of `other`
    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    /// Check if the device sits in liquid
    pub fn immersed(self) -> bool {
        self.contains(Self::LIQUID_PRESENT)
    }

    /// Check if at least one front-panel button is pressed
    ///
    /// The float switch alone does not count; it stays asserted the whole
    /// time the device is in the water.
    pub fn is_user_press(self) -> bool {
        self.0 & Self::BUTTONS != 0
    }

    /// Check if UP or DOWN is held
    pub fn adjusting(self) -> bool {
        self.0 & (Self::UP.0 | Self::DOWN.0) != 0
    }
}

impl BitOr for ButtonEvent {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Number of consecutive polls UP or DOWN has been held
///
/// Counted in throttled polls, not wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldCounter {
    polls: u16,
}

impl HoldCounter {
    pub const fn new() -> Self {
        Self { polls: 0 }
    }

    /// Account for one poll and return the updated count
    pub fn update(&mut self, buttons: ButtonEvent) -> u16 {
        if buttons.adjusting() {
            self.polls = self.polls.saturating_add(1);
        } else {
            self.polls = 0;
        }
        self.polls
    }

    pub fn count(&self) -> u16 {
        self.polls
    }

    pub fn reset(&mut self) {
        self.polls = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immersed() {
        assert!(ButtonEvent::LIQUID_PRESENT.immersed());
        assert!((ButtonEvent::OK | ButtonEvent::LIQUID_PRESENT).immersed());
        assert!(!ButtonEvent::OK.immersed());
    }

    #[test]
    fn test_float_switch_alone_is_not_a_press() {
        assert!(!ButtonEvent::LIQUID_PRESENT.is_user_press());
        assert!(!ButtonEvent::NONE.is_user_press());
        assert!((ButtonEvent::BACK | ButtonEvent::LIQUID_PRESENT).is_user_press());
    }

    #[test]
    fn test_from_bits_masks() {
        assert_eq!(ButtonEvent::from_bits(0xFF).bits(), 0x1F);
    }

    #[test]
    fn test_set_and_clear() {
        let mut b = ButtonEvent::NONE;
        b.set(ButtonEvent::UP, true);
        b.set(ButtonEvent::LIQUID_PRESENT, true);
        assert!(b.adjusting());
        b.set(ButtonEvent::UP, false);
        assert!(!b.adjusting());
        assert!(b.immersed());
    }

    #[test]
    fn test_hold_counter() {
        let mut hold = HoldCounter::new();
        assert_eq!(hold.update(ButtonEvent::DOWN), 1);
        assert_eq!(hold.update(ButtonEvent::DOWN), 2);
        assert_eq!(hold.update(ButtonEvent::UP), 3);
        assert_eq!(hold.update(ButtonEvent::LIQUID_PRESENT), 0);
        assert_eq!(hold.update(ButtonEvent::UP), 1);
        hold.reset();
        assert_eq!(hold.count(), 0);
    }
}
