//! Character display trait

/// Display width in characters
pub const LCD_COLS: usize = 16;

/// Display height in lines
pub const LCD_ROWS: usize = 2;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Controller did not answer in time
    Timeout,
}

/// Two-line character display with a switchable backlight
pub trait CharDisplay {
    /// Replace both lines
    ///
    /// Lines longer than [`LCD_COLS`] are cut; shorter ones are padded so
    /// no stale characters remain.
    fn print_lines(&mut self, lines: &[&str; LCD_ROWS]) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Current backlight state
    fn backlight_on(&self) -> bool;
}
