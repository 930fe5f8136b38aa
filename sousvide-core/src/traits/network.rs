//! Network interface trait
//!
//! The packet-level stack (ARP, IP, TCP, DHCP) lives outside the core. It
//! hands over TCP payloads together with their sequence number and sends
//! replies on the same connection.

use crate::config::NetworkConfig;

/// Errors from the network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetError {
    /// Link is down
    LinkDown,
    /// Controller rejected the frame
    Transmit,
    /// Address configuration could not be applied
    Configure,
}

/// Metadata of a received TCP payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedPacket {
    /// Payload bytes copied into the caller's buffer
    pub len: usize,
    /// TCP sequence number of the segment
    pub sequence: u32,
}

/// Byte-oriented network interface
pub trait NetworkInterface {
    /// Check the physical link
    fn link_up(&mut self) -> bool;

    /// Apply addressing after the link came up
    fn configure(&mut self, config: &NetworkConfig) -> Result<(), NetError>;

    /// Copy the next TCP payload into `buf`, if any
    fn receive(&mut self, buf: &mut [u8]) -> Option<ReceivedPacket>;

    /// Reply to the last received payload
    fn reply(&mut self, data: &[u8]) -> Result<(), NetError>;

    /// Address currently in use, for the 404 page
    fn local_ip(&self) -> [u8; 4];
}
