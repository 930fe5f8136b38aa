//! HD44780-style character LCD
//!
//! The controller primitives (cursor placement, text at the cursor,
//! backlight) come from the board through [`LcdBackend`]. [`LcdDisplay`]
//! turns them into whole-line writes: each row is padded to the full
//! width so leftovers of a longer previous line disappear, and rows that
//! did not change are not sent again.

use heapless::String;
use sousvide_core::traits::{CharDisplay, DisplayError, LCD_COLS, LCD_ROWS};

/// Character LCD controller primitives
pub trait LcdBackend {
    /// Move the cursor to `col`, `row` (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;
}

type Row = String<LCD_COLS>;

pub struct LcdDisplay<L> {
    backend: L,
    /// What each row currently shows; `None` after an error
    shown: [Option<Row>; LCD_ROWS],
    backlight: bool,
}

impl<L: LcdBackend> LcdDisplay<L> {
    /// Wrap the backend; the backlight is assumed off until set
    pub fn new(backend: L) -> Self {
        Self {
            backend,
            shown: [None, None],
            backlight: false,
        }
    }

    pub fn backend(&self) -> &L {
        &self.backend
    }

    fn pad(text: &str) -> Row {
        let mut row = Row::new();
        for c in text.chars() {
            if row.push(c).is_err() {
                break;
            }
        }
        while row.len() < LCD_COLS {
            if row.push(' ').is_err() {
                break;
            }
        }
        row
    }
}

impl<L: LcdBackend> CharDisplay for LcdDisplay<L> {
    fn print_lines(&mut self, lines: &[&str; LCD_ROWS]) -> Result<(), DisplayError> {
        for (index, text) in lines.iter().enumerate() {
            let row = Self::pad(text);
            if self.shown[index].as_ref() == Some(&row) {
                continue;
            }

            self.shown[index] = None;
            self.backend.set_cursor(0, index as u8)?;
            self.backend.write_text(&row)?;
            self.shown[index] = Some(row);
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backend.set_backlight(on)?;
        self.backlight = on;
        Ok(())
    }

    fn backlight_on(&self) -> bool {
        self.backlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockLcd {
        cells: [[u8; LCD_COLS]; LCD_ROWS],
        cursor: (usize, usize),
        writes: u32,
        backlight: bool,
        fail: bool,
    }

    impl LcdBackend for MockLcd {
        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.cursor = (col as usize, row as usize);
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
            let (col, row) = self.cursor;
            for (offset, byte) in text.bytes().enumerate() {
                self.cells[row][col + offset] = byte;
            }
            self.writes += 1;
            Ok(())
        }

        fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
            self.backlight = on;
            Ok(())
        }
    }

    fn row(lcd: &MockLcd, index: usize) -> &str {
        core::str::from_utf8(&lcd.cells[index]).unwrap()
    }

    #[test]
    fn test_lines_are_padded() {
        let mut display = LcdDisplay::new(MockLcd::default());
        display
            .print_lines(&["Choose cooking", "preset"])
            .unwrap();
        display.print_lines(&["Turn off", "device"]).unwrap();
        assert_eq!(row(display.backend(), 0), "Turn off        ");
        assert_eq!(row(display.backend(), 1), "device          ");
    }

    #[test]
    fn test_unchanged_rows_skipped() {
        let mut display = LcdDisplay::new(MockLcd::default());
        display.print_lines(&["Current Temp", "58.3 C"]).unwrap();
        display.print_lines(&["Current Temp", "58.4 C"]).unwrap();
        assert_eq!(display.backend().writes, 3);
    }

    #[test]
    fn test_error_forces_rewrite() {
        let mut display = LcdDisplay::new(MockLcd::default());
        display.print_lines(&["a", "b"]).unwrap();

        display.backend.fail = true;
        assert_eq!(display.print_lines(&["c", "b"]), Err(DisplayError::Bus));

        display.backend.fail = false;
        display.print_lines(&["c", "b"]).unwrap();
        assert_eq!(row(display.backend(), 0), "c               ");
    }

    #[test]
    fn test_backlight() {
        let mut display = LcdDisplay::new(MockLcd::default());
        assert!(!display.backlight_on());
        display.set_backlight(true).unwrap();
        assert!(display.backlight_on());
        assert!(display.backend().backlight);
    }
}
