//! Network configuration and its persisted layout
//!
//! Stored as a fixed-width postcard blob:
//!
//! ```text
//! [mode u8][mac 6][ip 4][gateway 4][dns 4][netmask 4]
//! ```
//!
//! A mode byte of `0xFF` is what erased storage reads back as and marks the
//! configuration as never written.

use serde::{Deserialize, Serialize};
use sousvide_http::IpSettings;

use super::persist::ConfigError;

/// Encoded size of a network configuration blob
pub const NETWORK_BLOB_LEN: usize = 1 + 6 + 4 * 4;

const MODE_STATIC: u8 = 0;
const MODE_DHCP: u8 = 1;
const MODE_ERASED: u8 = 0xFF;

/// How the interface obtains its address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    #[default]
    Static,
    Dhcp,
}

/// Interface addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    pub mode: AddressMode,
    pub mac: [u8; 6],
    pub ip: [u8; 4],
    pub gateway: [u8; 4],
    pub dns: [u8; 4],
    pub netmask: [u8; 4],
}

impl Default for NetworkConfig {
    /// First-run settings: static 192.168.1.200/24
    fn default() -> Self {
        Self {
            mode: AddressMode::Static,
            mac: [0x02, 0x53, 0x56, 0x00, 0x00, 0x01],
            ip: [192, 168, 1, 200],
            gateway: [192, 168, 1, 1],
            dns: [192, 168, 1, 1],
            netmask: [255, 255, 255, 0],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Blob {
    mode: u8,
    mac: [u8; 6],
    ip: [u8; 4],
    gateway: [u8; 4],
    dns: [u8; 4],
    netmask: [u8; 4],
}

impl NetworkConfig {
    /// Check if the address comes from DHCP
    pub fn dhcp(&self) -> bool {
        self.mode == AddressMode::Dhcp
    }

    /// Settings as shown on the web form
    pub fn ip_settings(&self) -> IpSettings {
        IpSettings {
            dhcp: self.dhcp(),
            ip: self.ip,
            netmask: self.netmask,
            gateway: self.gateway,
            dns: self.dns,
        }
    }

    /// Copy of this configuration with the form settings applied
    ///
    /// The MAC address is kept.
    pub fn with_ip_settings(&self, settings: &IpSettings) -> Self {
        Self {
            mode: if settings.dhcp {
                AddressMode::Dhcp
            } else {
                AddressMode::Static
            },
            mac: self.mac,
            ip: settings.ip,
            gateway: settings.gateway,
            dns: settings.dns,
            netmask: settings.netmask,
        }
    }

    /// Encode into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        let blob = Blob {
            mode: match self.mode {
                AddressMode::Static => MODE_STATIC,
                AddressMode::Dhcp => MODE_DHCP,
            },
            mac: self.mac,
            ip: self.ip,
            gateway: self.gateway,
            dns: self.dns,
            netmask: self.netmask,
        };
        Ok(postcard::to_slice(&blob, buf)?)
    }

    /// Decode a stored blob
    ///
    /// Returns `Ok(None)` for erased storage.
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>, ConfigError> {
        let blob: Blob = postcard::from_bytes(bytes)?;
        let mode = match blob.mode {
            MODE_STATIC => AddressMode::Static,
            MODE_DHCP => AddressMode::Dhcp,
            MODE_ERASED => return Ok(None),
            _ => return Err(ConfigError::Corrupt),
        };
        Ok(Some(Self {
            mode,
            mac: blob.mac,
            ip: blob.ip,
            gateway: blob.gateway,
            dns: blob.dns,
            netmask: blob.netmask,
        }))
    }
}
