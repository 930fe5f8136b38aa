//! Loading and saving configuration blobs

use serde::{Deserialize, Serialize};
use sousvide_hal::{ConfigStorage, StorageError, StorageKey};

use super::network::NetworkConfig;
use super::settings::ControllerConfig;

/// Scratch buffer size for one blob
pub const BLOB_BUF_LEN: usize = 64;

const SETPOINT_TAG: u8 = 0x01;
const ERASED: u8 = 0xFF;

/// Errors from configuration persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Underlying storage failed
    Storage(StorageError),
    /// Blob could not be encoded or decoded
    Encoding,
    /// Blob decoded but holds an impossible value
    Corrupt,
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        ConfigError::Storage(e)
    }
}

impl From<postcard::Error> for ConfigError {
    fn from(_: postcard::Error) -> Self {
        ConfigError::Encoding
    }
}

#[derive(Serialize, Deserialize)]
struct SetpointBlob {
    tag: u8,
    temp_x10: i16,
}

/// Typed access to the keyed configuration storage
pub struct ConfigStore<S> {
    storage: S,
}

impl<S: ConfigStorage> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Load the network configuration
    ///
    /// On first boot the defaults are written back so the next boot reads
    /// a valid blob.
    pub fn load_network(&mut self) -> Result<NetworkConfig, ConfigError> {
        let mut buf = [0u8; BLOB_BUF_LEN];
        let len = self.storage.read(StorageKey::NetworkConfig, &mut buf)?;

        match NetworkConfig::decode(&buf[..len])? {
            Some(config) => Ok(config),
            None => {
                info!("network config uninitialized, writing defaults");
                let config = NetworkConfig::default();
                self.save_network(&config)?;
                Ok(config)
            }
        }
    }

    /// Persist the network configuration
    pub fn save_network(&mut self, config: &NetworkConfig) -> Result<(), ConfigError> {
        let mut buf = [0u8; BLOB_BUF_LEN];
        let used = config.encode(&mut buf)?;
        self.storage.write(StorageKey::NetworkConfig, used)?;
        Ok(())
    }

    /// Load the committed target temperature
    ///
    /// Erased storage yields the configured default. Stored values are
    /// clamped into the selectable range.
    pub fn load_setpoint(&mut self, config: &ControllerConfig) -> Result<i16, ConfigError> {
        let mut buf = [0u8; BLOB_BUF_LEN];
        let len = self.storage.read(StorageKey::Setpoint, &mut buf)?;
        let bytes = &buf[..len];

        if bytes.first().map_or(true, |&b| b == ERASED) {
            return Ok(config.default_setpoint_x10);
        }

        let blob: SetpointBlob = postcard::from_bytes(bytes)?;
        if blob.tag != SETPOINT_TAG {
            return Err(ConfigError::Corrupt);
        }
        Ok(config.clamp_setpoint(blob.temp_x10))
    }

    /// Persist the committed target temperature
    pub fn save_setpoint(&mut self, temp_x10: i16) -> Result<(), ConfigError> {
        let mut buf = [0u8; BLOB_BUF_LEN];
        let blob = SetpointBlob {
            tag: SETPOINT_TAG,
            temp_x10,
        };
        let used = postcard::to_slice(&blob, &mut buf)?;
        self.storage.write(StorageKey::Setpoint, used)?;
        Ok(())
    }
}
