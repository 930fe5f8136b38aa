//! Temperature bus trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered on the channel
    NotFound,
    /// Scratchpad checksum mismatch
    Crc,
    /// Reading outside the sensor's range
    OutOfRange,
}

/// A set of temperature channels sharing one conversion command
///
/// Conversions are asynchronous: [`request_conversion`] starts them and
/// returns at once, [`read_channel_x10`] returns the last completed result.
/// The caller is responsible for waiting the conversion time.
///
/// [`request_conversion`]: TemperatureBus::request_conversion
/// [`read_channel_x10`]: TemperatureBus::read_channel_x10
pub trait TemperatureBus {
    /// Number of channels
    fn channel_count(&self) -> usize;

    /// Human-readable channel name
    fn channel_name(&self, index: usize) -> &str;

    /// Configured resolution in bits as reported by the bus
    fn resolution_bits(&self) -> u8;

    /// Start a conversion on every channel
    fn request_conversion(&mut self);

    /// Read the last converted value of a channel in 0.1 °C
    fn read_channel_x10(&mut self, index: usize) -> Result<i16, SensorError>;
}
