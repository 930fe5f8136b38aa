//! Configuration types
//!
//! Tunables live in [`ControllerConfig`]; the network settings and the
//! committed setpoint are persisted as postcard blobs through the hal
//! [`ConfigStorage`](sousvide_hal::ConfigStorage) trait.

pub mod network;
pub mod persist;
pub mod presets;
pub mod settings;

pub use network::{AddressMode, NetworkConfig};
pub use persist::{ConfigError, ConfigStore};
pub use presets::{Preset, PRESETS};
pub use settings::{ControllerConfig, PidTunings};
