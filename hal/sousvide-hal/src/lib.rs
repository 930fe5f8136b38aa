//! Sous vide controller Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the controller
//! needs from a board. Chip-specific code implements them directly, or
//! wraps its `embedded-hal` 1.0 pins in the adapters from [`gpio`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sousvide-core / sousvide-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sousvide-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board support (embedded-hal pins,      │
//! │  EEPROM, ...)                           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::PwmPin`] - Digital and PWM I/O
//! - [`storage::ConfigStorage`] - Non-volatile configuration blobs

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, PwmPin};
pub use storage::{ConfigStorage, RamStorage, StorageError, StorageKey};
