//! Hardware abstraction traits
//!
//! These traits define the interface between the control core and the
//! board: buttons, display, actuators, temperature bus, network interface
//! and system services.

pub mod buttons;
pub mod display;
pub mod heater;
pub mod network;
pub mod sensor;
pub mod system;

pub use buttons::ButtonPanel;
pub use display::{CharDisplay, DisplayError, LCD_COLS, LCD_ROWS};
pub use heater::{EffortController, HeaterOutput, PumpOutput};
pub use network::{NetError, NetworkInterface, ReceivedPacket};
pub use sensor::{SensorError, TemperatureBus};
pub use system::SystemControl;
