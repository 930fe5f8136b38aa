//! Board-agnostic cooperative control core for the sous vide controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware:
//!
//! - Interval gates over a wrapping millisecond clock
//! - Button and liquid-level sampling
//! - Operating-state machine and menu behavior
//! - Temperature acquisition with resolution-dependent conversion waits
//! - Closed-loop actuator control behind the immersion interlock
//! - Web request routing with retransmission suppression
//! - Configuration types and persistence
//! - The main loop tying it all together
//!
//! Everything runs from one non-blocking loop. The only interrupt-level
//! code is the tick source, which shares state with the loop through
//! atomics.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod appliance;
pub mod clock;
pub mod config;
pub mod context;
pub mod control;
pub mod input;
pub mod menu;
pub mod safety;
pub mod state;
pub mod temperature;
pub mod tick;
pub mod traits;
pub mod web;

pub use appliance::{Appliance, Board, Peripherals};
pub use clock::{Clock, IntervalTimer, TimerId, Timers};
pub use context::ControllerContext;
pub use input::ButtonEvent;
pub use state::{Action, MenuEvent, OperatingState, Transition};
