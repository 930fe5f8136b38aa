//! Temperature acquisition
//!
//! Conversions are started asynchronously and harvested only once the
//! resolution-dependent conversion time has passed. The loop never waits.

pub mod coordinator;
pub mod resolution;

pub use coordinator::{Harvest, TemperatureCoordinator, TemperatureSample, MAX_CHANNELS};
pub use resolution::{Resolution, Tenths};
