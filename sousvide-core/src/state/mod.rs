//! Operating-state machine
//!
//! The transition table is a pure function of the current state and a
//! menu event. Side effects are returned as an [`Action`] tag and carried
//! out by the menu layer, so the table can be tested without hardware.

pub mod events;
pub mod machine;

pub use events::MenuEvent;
pub use machine::{Action, OperatingState, Transition};
