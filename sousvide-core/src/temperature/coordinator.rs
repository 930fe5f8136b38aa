//! Conversion scheduling and harvesting

use heapless::Vec;

use super::resolution::Resolution;
use crate::clock::{TimerId, Timers};
use crate::traits::TemperatureBus;

/// Maximum number of temperature channels
pub const MAX_CHANNELS: usize = 8;

/// Outcome of a harvest attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Harvest {
    /// Conversion time not yet over; nothing changed
    Pending,
    /// New values stored and a new conversion started
    Fresh,
    /// No channel could be read; previous values kept, new conversion started
    Failed,
}

/// Last harvested temperatures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemperatureSample {
    /// Per-channel values; `None` if the channel failed in the last harvest
    channels: Vec<Option<i16>, MAX_CHANNELS>,
    /// Mean over the channels that read successfully
    average_x10: Option<i16>,
    /// Last harvest produced at least one reading
    valid: bool,
}

impl TemperatureSample {
    /// Per-channel values in 0.1 °C
    pub fn channels(&self) -> &[Option<i16>] {
        &self.channels
    }

    /// Average of the last successful harvest, even if a later one failed
    pub fn average_x10(&self) -> Option<i16> {
        self.average_x10
    }

    /// Current temperature used for control
    ///
    /// `None` before the first harvest and after a failed one.
    pub fn current_x10(&self) -> Option<i16> {
        if self.valid {
            self.average_x10
        } else {
            None
        }
    }
}

/// Schedules conversions and harvests them once complete
#[derive(Debug, Clone)]
pub struct TemperatureCoordinator {
    resolution: Resolution,
    sample: TemperatureSample,
}

impl TemperatureCoordinator {
    /// Create a coordinator for a bus with the given resolution
    ///
    /// Unknown resolutions are reported and treated as the slowest tier.
    pub fn new(resolution_bits: u8) -> Self {
        Self {
            resolution: Resolution::from_bits_or_slowest(resolution_bits),
            sample: TemperatureSample::default(),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Time a conversion needs before it can be harvested
    pub fn latency_ms(&self) -> u32 {
        self.resolution.conversion_time_ms()
    }

    pub fn sample(&self) -> &TemperatureSample {
        &self.sample
    }

    /// Start a conversion on every channel
    ///
    /// A pending conversion is superseded; the wait starts over.
    pub fn request_conversion<B: TemperatureBus>(
        &mut self,
        bus: &mut B,
        timers: &mut Timers,
        now_ms: u32,
    ) {
        bus.request_conversion();
        timers.reset(TimerId::Conversion, now_ms);
    }

    /// Harvest the last conversion if its time is over
    pub fn read_all<B: TemperatureBus>(
        &mut self,
        bus: &mut B,
        timers: &mut Timers,
        now_ms: u32,
    ) -> Harvest {
        if timers.elapsed(TimerId::Conversion, now_ms) < self.latency_ms() {
            return Harvest::Pending;
        }

        let count = bus.channel_count().min(MAX_CHANNELS);
        let mut channels: Vec<Option<i16>, MAX_CHANNELS> = Vec::new();
        let mut sum: i32 = 0;
        let mut good: i32 = 0;

        for index in 0..count {
            let reading = match bus.read_channel_x10(index) {
                Ok(temp_x10) => {
                    sum += i32::from(temp_x10);
                    good += 1;
                    Some(temp_x10)
                }
                Err(e) => {
                    warn!("sensor {=usize} read failed: {}", index, e);
                    None
                }
            };
            // Cannot overflow: count is capped at MAX_CHANNELS
            let _ = channels.push(reading);
        }

        self.request_conversion(bus, timers, now_ms);

        if good == 0 {
            warn!("no temperature channel readable");
            self.sample.valid = false;
            return Harvest::Failed;
        }

        // Mean of i16 values always fits back into i16
        let average = (sum / good) as i16;
        self.sample = TemperatureSample {
            channels,
            average_x10: Some(average),
            valid: true,
        };
        trace!("temperature harvested, average {=i16}", average);
        Harvest::Fresh
    }
}
