//! Q16.16 fixed-point arithmetic for the control law
//!
//! Keeps the PID free of floating point so it runs the same on FPU-less
//! parts. All arithmetic saturates; a control law must never wrap from
//! "full heat" to "full negative".

use core::ops::Neg;

/// Q16.16 fixed-point number
///
/// Range: approximately -32768.0 to +32767.99998
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fixed32(pub i32);

impl Fixed32 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << 16);
    pub const MAX: Self = Self(i32::MAX);
    pub const MIN: Self = Self(i32::MIN);

    /// Fractional bits (16)
    pub const FRAC_BITS: u32 = 16;

    /// Create from a whole integer, saturating outside the range
    pub const fn from_int(n: i32) -> Self {
        Self::from_i64((n as i64) << Self::FRAC_BITS)
    }

    /// Create from a value scaled by 1000
    ///
    /// `850_000` is 850.0, `500` is 0.5.
    pub const fn from_scaled_1000(n: i32) -> Self {
        Self::from_i64(((n as i64) << Self::FRAC_BITS) / 1000)
    }

    /// Create from tenths, the unit temperatures are kept in
    pub const fn from_tenths(n: i16) -> Self {
        Self::from_i64(((n as i64) << Self::FRAC_BITS) / 10)
    }

    const fn from_i64(raw: i64) -> Self {
        if raw > i32::MAX as i64 {
            Self::MAX
        } else if raw < i32::MIN as i64 {
            Self::MIN
        } else {
            Self(raw as i32)
        }
    }

    /// Whole part, rounded toward negative infinity
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    /// Value scaled by 1000, rounded toward negative infinity
    pub const fn to_scaled_1000(self) -> i32 {
        ((self.0 as i64 * 1000) >> Self::FRAC_BITS) as i32
    }

    /// Saturating multiplication
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> Self {
        Self::from_i64(((self.0 as i64) * (other.0 as i64)) >> Self::FRAC_BITS)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Neg for Fixed32 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}
