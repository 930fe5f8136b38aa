//! Non-volatile configuration storage
//!
//! Provides a trait for small keyed configuration blobs, typically backed
//! by EEPROM or a reserved flash page. Writes are rare (user-initiated
//! configuration changes), reads happen once at boot.

/// Storage keys for configuration data
///
/// Each key owns a fixed slot. The blob layout inside a slot belongs to
/// the code that writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Network configuration (mode flag, MAC and IPv4 settings)
    NetworkConfig = 0,
    /// Last committed desired temperature
    Setpoint = 1,
}

impl StorageKey {
    /// Number of defined keys
    pub const COUNT: usize = 2;

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::NetworkConfig),
            1 => Some(StorageKey::Setpoint),
            _ => None,
        }
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying device operation failed
    Device,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data does not fit in the slot
    SlotFull,
}

/// Keyed configuration storage
///
/// A slot that has never been written reads back as erased memory
/// (`0xFF` bytes), so callers can detect first boot from the content.
pub trait ConfigStorage {
    /// Read the slot for `key` into `buffer`
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write `data` into the slot for `key`
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;
}

/// RAM-backed storage with erased-EEPROM semantics
///
/// Useful for host simulation and for boards that keep configuration in
/// battery-backed RAM. Every slot is `SLOT` bytes long.
#[derive(Debug, Clone)]
pub struct RamStorage<const SLOT: usize> {
    slots: [[u8; SLOT]; StorageKey::COUNT],
    writes: u32,
}

impl<const SLOT: usize> Default for RamStorage<SLOT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOT: usize> RamStorage<SLOT> {
    /// Create storage with every slot erased
    pub const fn new() -> Self {
        Self {
            slots: [[0xFF; SLOT]; StorageKey::COUNT],
            writes: 0,
        }
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Raw content of a slot
    pub fn slot(&self, key: StorageKey) -> &[u8] {
        &self.slots[key.as_u8() as usize]
    }
}

impl<const SLOT: usize> ConfigStorage for RamStorage<SLOT> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        if buffer.len() < SLOT {
            return Err(StorageError::BufferTooSmall);
        }
        buffer[..SLOT].copy_from_slice(&self.slots[key.as_u8() as usize]);
        Ok(SLOT)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        if data.len() > SLOT {
            return Err(StorageError::SlotFull);
        }
        let slot = &mut self.slots[key.as_u8() as usize];
        slot[..data.len()].copy_from_slice(data);
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }
}
