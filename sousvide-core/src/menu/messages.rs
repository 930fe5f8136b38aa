//! Fixed display texts

use crate::traits::LCD_ROWS;

/// One screenful of fixed text
pub type Message = [&'static str; LCD_ROWS];

pub const PRESS_OK_TO_START: Message = ["Press OK", "to start"];
pub const PUT_IN_WATER: Message = ["Please put", "device in water"];
pub const OR_TURN_OFF: Message = ["or press OK", "to turn off"];

/// Alternated while a running device is out of the water
pub const NOT_IMMERSED: [Message; 2] = [PUT_IN_WATER, OR_TURN_OFF];

pub const MENU_TURN_OFF: Message = ["Turn off", "device"];
pub const MENU_TEMP: Message = ["Setup target", "temperature"];
pub const MENU_PRESET: Message = ["Choose cooking", "preset"];
pub const MENU_NET_SETTINGS: Message = ["Show network", "settings"];

pub const CURRENT_TEMP: &str = "Current Temp";
pub const TARGET_TEMP: &str = "Target Temp";
pub const SET_TARGET_TEMP: &str = "Set target temp";

/// Unit suffix after temperature values
pub const CELSIUS: &str = "C";

/// Pick variant `counter mod N`
pub fn rotate<T: Copy, const N: usize>(variants: &[T; N], counter: u32) -> T {
    variants[(counter as usize) % N]
}
