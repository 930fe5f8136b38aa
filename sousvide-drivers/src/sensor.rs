//! DS18B20 temperature sensor array
//!
//! All sensors share one 1-Wire bus. A single broadcast starts the
//! conversion on every device; each device's scratchpad is then read
//! individually once the resolution-dependent conversion time is over.
//! The bus transactions themselves come from the board through
//! [`OneWireBus`].

use heapless::Vec;
use sousvide_core::temperature::{Resolution, MAX_CHANNELS};
use sousvide_core::traits::{SensorError, TemperatureBus};

/// 64-bit ROM code of a 1-Wire device
pub type RomCode = [u8; 8];

/// Scratchpad contents, CRC byte last
pub type Scratchpad = [u8; 9];

/// 1-Wire bus transactions needed by the sensor array
pub trait OneWireBus {
    /// Broadcast CONVERT T to every device (skip ROM)
    fn convert_all(&mut self);

    /// Read the scratchpad of one device; `None` if it did not answer
    fn read_scratchpad(&mut self, rom: &RomCode) -> Option<Scratchpad>;
}

/// Lowest and highest temperature the sensor reports, °C × 10
const RANGE_X10: (i16, i16) = (-550, 1250);

/// One sensor on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSlot {
    pub rom: RomCode,
    pub name: &'static str,
}

pub struct Ds18b20Array<W> {
    wire: W,
    sensors: Vec<SensorSlot, MAX_CHANNELS>,
    resolution: Resolution,
}

impl<W: OneWireBus> Ds18b20Array<W> {
    pub fn new(wire: W, resolution: Resolution) -> Self {
        Self {
            wire,
            sensors: Vec::new(),
            resolution,
        }
    }

    /// Register a sensor; returns it back if the array is full
    pub fn add(&mut self, rom: RomCode, name: &'static str) -> Result<(), SensorSlot> {
        self.sensors.push(SensorSlot { rom, name })
    }

    pub fn sensors(&self) -> &[SensorSlot] {
        &self.sensors
    }

    pub fn wire_mut(&mut self) -> &mut W {
        &mut self.wire
    }
}

impl<W: OneWireBus> TemperatureBus for Ds18b20Array<W> {
    fn channel_count(&self) -> usize {
        self.sensors.len()
    }

    fn channel_name(&self, index: usize) -> &str {
        self.sensors.get(index).map_or("", |s| s.name)
    }

    fn resolution_bits(&self) -> u8 {
        self.resolution.bits()
    }

    fn request_conversion(&mut self) {
        self.wire.convert_all();
    }

    fn read_channel_x10(&mut self, index: usize) -> Result<i16, SensorError> {
        let slot = self.sensors.get(index).ok_or(SensorError::NotFound)?;
        let pad = self
            .wire
            .read_scratchpad(&slot.rom)
            .ok_or(SensorError::NotFound)?;
        if crc8(&pad[..8]) != pad[8] {
            return Err(SensorError::Crc);
        }
        let temp_x10 = raw_to_x10(pad[0], pad[1], self.resolution);
        if !(RANGE_X10.0..=RANGE_X10.1).contains(&temp_x10) {
            return Err(SensorError::OutOfRange);
        }
        Ok(temp_x10)
    }
}

/// Convert the temperature register (1/16 °C, little endian) to tenths
///
/// Undefined low bits are masked off for the lower resolutions. Rounds
/// half away from zero.
pub fn raw_to_x10(lsb: u8, msb: u8, resolution: Resolution) -> i16 {
    let mask = match resolution {
        Resolution::Bits9 => 0b1111_1000,
        Resolution::Bits10 => 0b1111_1100,
        Resolution::Bits11 => 0b1111_1110,
        Resolution::Bits12 => 0b1111_1111,
    };
    let raw = i32::from(i16::from_le_bytes([lsb & mask, msb]));
    let scaled = raw * 10;
    let rounded = (if scaled >= 0 { scaled + 8 } else { scaled - 8 }) / 16;
    rounded as i16
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected)
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}
