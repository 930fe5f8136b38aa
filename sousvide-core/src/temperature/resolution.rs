//! Sensor resolution and conversion times

use core::fmt;

/// Sensor resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl Resolution {
    /// Slowest tier, used when the resolution is not recognized
    pub const SLOWEST: Resolution = Resolution::Bits12;

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Resolution::Bits9),
            10 => Some(Resolution::Bits10),
            11 => Some(Resolution::Bits11),
            12 => Some(Resolution::Bits12),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Resolution::Bits9 => 9,
            Resolution::Bits10 => 10,
            Resolution::Bits11 => 11,
            Resolution::Bits12 => 12,
        }
    }

    /// Minimum conversion time in milliseconds
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Resolution::Bits9 => 94,
            Resolution::Bits10 => 188,
            Resolution::Bits11 => 375,
            Resolution::Bits12 => 750,
        }
    }

    /// Resolution for a bit count, falling back to the slowest tier
    pub fn from_bits_or_slowest(bits: u8) -> Self {
        match Self::from_bits(bits) {
            Some(resolution) => resolution,
            None => {
                warn!("unknown sensor resolution {=u8}, assuming 12 bits", bits);
                Self::SLOWEST
            }
        }
    }
}

/// Display wrapper for a tenths-of-a-degree value, e.g. `61.5`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i16);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}
