//! Screen buffer for the character display
//!
//! Rendering writes into this buffer every throttled tick; the display is
//! only touched when the content actually changed or a redraw is forced.

use core::fmt::{self, Write};

use heapless::String;

use super::messages::Message;
use crate::traits::{CharDisplay, DisplayError, LCD_COLS, LCD_ROWS};

type Line = String<LCD_COLS>;

/// Two-line screen buffer with change tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; LCD_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that silently drops what does not fit the line
struct Clipped<'a>(&'a mut Line);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

impl Screen {
    /// Create an empty screen that needs a first draw
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Set a row from text, cutting at the display width
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.set_line_fmt(row, format_args!("{}", text));
    }

    /// Set a row from format arguments, cutting at the display width
    pub fn set_line_fmt(&mut self, row: usize, args: fmt::Arguments<'_>) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let mut next = Line::new();
        let _ = Clipped(&mut next).write_fmt(args);
        if *line != next {
            *line = next;
            self.dirty = true;
        }
    }

    /// Show a fixed message
    pub fn show(&mut self, message: &Message) {
        for (row, text) in message.iter().enumerate() {
            self.set_line(row, text);
        }
    }

    /// Get the content of a specific row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Write to the display if anything changed
    pub fn flush<D: CharDisplay>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        if !self.dirty {
            return Ok(());
        }
        display.print_lines(&[self.lines[0].as_str(), self.lines[1].as_str()])?;
        self.dirty = false;
        Ok(())
    }
}
