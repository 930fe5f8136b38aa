//! Closed-loop actuator control

pub mod closed_loop;

pub use closed_loop::{ActuatorCommand, ClosedLoopController};
