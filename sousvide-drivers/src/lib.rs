//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sousvide-core on top of the sousvide-hal pin and bus traits:
//!
//! - Heater effort (PID control law, PWM-driven solid state relay)
//! - Circulation pump relay
//! - Button panel with liquid-level switch
//! - Two-line character LCD
//! - DS18B20 temperature sensor array

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod heater;
pub mod lcd;
pub mod pump;
pub mod sensor;
