//! What goes on the 16x2 character display.
//!
//! Screens are built as plain values ([`Screen`] of two [`Line`]s) and
//! written through a [`ScreenCache`], which skips rows and cursor moves that
//! are already on the glass. Every display transaction costs milliseconds
//! of bus time, so unchanged rows are never rewritten.

use core::fmt::Write;

use heapless::String;

use crate::config::{LCD_COLUMNS, LCD_ROWS};
use crate::datetime::DateTime;
use crate::menu::MenuOption;

/// Trait for abstracting a character display.
///
/// Implement this for your display driver (HD44780 over I²C, SPI, a
/// simulator, ...). Rows and columns are zero-based.
pub trait CharDisplay {
    /// Transport error type.
    type Error;

    /// Brings the display up and leaves it blank.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Blanks `row`, then writes `text` starting at `col`.
    fn clear_write(&mut self, text: &str, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Moves the cursor to (`row`, `col`).
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;
}

/// One display row: text and the column it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String<LCD_COLUMNS>,
    col: u8,
}

impl Line {
    /// Creates a line, truncating `text` to the display width.
    pub fn new(text: &str, col: u8) -> Self {
        let mut line = Self::empty(col);
        for c in text.chars() {
            if line.text.push(c).is_err() {
                break;
            }
        }
        line
    }

    fn empty(col: u8) -> Self {
        Self {
            text: String::new(),
            col,
        }
    }

    /// The text of the line.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Starting column.
    pub fn col(&self) -> u8 {
        self.col
    }
}

/// The two rows of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub top: Line,
    pub bottom: Line,
}

impl Screen {
    fn new(top: Line, bottom: Line) -> Self {
        Self { top, bottom }
    }

    /// Both rows blank.
    pub fn blank() -> Self {
        Self::new(Line::empty(0), Line::empty(0))
    }
}

fn clock_line(dt: &DateTime, col: u8) -> Line {
    let mut line = Line::empty(col);
    // Fits: at most 8 characters for in-range fields.
    let _ = write!(
        line.text,
        "{:02}:{:02}:{:02}",
        dt.hours, dt.minutes, dt.seconds
    );
    line
}

fn date_line(dt: &DateTime) -> Line {
    let mut line = Line::empty(1);
    let _ = write!(
        line.text,
        "{} {:02}/{:02}/{:04}",
        dt.weekday_name(),
        dt.date,
        dt.month,
        dt.year
    );
    line
}

/// Idle screen: `hh:mm:ss` over `DDD dd/mm/yyyy`.
///
/// With an alarm set the time moves to column 0 behind an `A` marker.
pub fn show_time(now: &DateTime, alarm_set: bool) -> Screen {
    let top = if alarm_set {
        let mut line = Line::empty(0);
        let _ = write!(
            line.text,
            "A   {:02}:{:02}:{:02}",
            now.hours, now.minutes, now.seconds
        );
        line
    } else {
        clock_line(now, 4)
    };
    Screen::new(top, date_line(now))
}

/// Time edit screen, laid out like the idle screen without the alarm marker.
pub fn edit_time(dt: &DateTime) -> Screen {
    Screen::new(clock_line(dt, 4), date_line(dt))
}

/// Alarm edit screen: `hh:mm` over the weekday.
pub fn edit_alarm(dt: &DateTime) -> Screen {
    let mut top = Line::empty(5);
    let _ = write!(top.text, "{:02}:{:02}", dt.hours, dt.minutes);
    Screen::new(top, Line::new(dt.weekday_name(), 6))
}

/// Menu carousel entry.
pub fn menu(option: MenuOption) -> Screen {
    match option {
        MenuOption::ShowTime => Screen::new(Line::new("1) Ver", 5), Line::new("fecha y hora", 2)),
        MenuOption::SetTime => Screen::new(Line::new("2) Ajustar", 2), Line::new("hora y fecha", 2)),
        MenuOption::SetAlarm => Screen::new(Line::new("3) Poner", 4), Line::new("alarma", 5)),
    }
}

/// Shown after a new time was written to the RTC.
pub fn time_saved() -> Screen {
    Screen::new(Line::new("Hora", 6), Line::new("actualizada.", 2))
}

/// Shown after a new alarm was written to the RTC.
pub fn alarm_saved() -> Screen {
    Screen::new(Line::new("Alarma", 5), Line::new("guardada.", 4))
}

/// Last known display contents, used to skip redundant writes.
#[derive(Debug, Default)]
pub struct ScreenCache {
    rows: [Option<Line>; LCD_ROWS as usize],
    cursor: Option<(u8, u8)>,
}

impl ScreenCache {
    /// Creates a cache that knows nothing about the display.
    pub const fn new() -> Self {
        Self {
            rows: [const { None }; LCD_ROWS as usize],
            cursor: None,
        }
    }

    /// Forgets the display contents so the next draw writes everything.
    pub fn invalidate(&mut self) {
        self.rows = [const { None }; LCD_ROWS as usize];
        self.cursor = None;
    }

    /// Writes the rows of `screen` that differ from what is displayed.
    ///
    /// Returns the number of rows written. A failed row stays unknown and is
    /// retried on the next draw.
    pub fn draw<D: CharDisplay>(
        &mut self,
        display: &mut D,
        screen: &Screen,
    ) -> Result<usize, D::Error> {
        let mut written = 0;
        for (row, line) in [&screen.top, &screen.bottom].into_iter().enumerate() {
            if self.rows[row].as_ref() == Some(line) {
                continue;
            }
            self.rows[row] = None;
            // Writing moves the hardware cursor.
            self.cursor = None;
            display.clear_write(line.as_str(), row as u8, line.col())?;
            self.rows[row] = Some(line.clone());
            written += 1;
        }
        Ok(written)
    }

    /// Moves the cursor to `pos` unless it is already there.
    pub fn place_cursor<D: CharDisplay>(
        &mut self,
        display: &mut D,
        pos: (u8, u8),
    ) -> Result<(), D::Error> {
        if self.cursor == Some(pos) {
            return Ok(());
        }
        self.cursor = None;
        display.set_cursor(pos.0, pos.1)?;
        self.cursor = Some(pos);
        Ok(())
    }

    /// The line last written to `row`, if known.
    pub fn row(&self, row: usize) -> Option<&Line> {
        self.rows.get(row).and_then(Option::as_ref)
    }
}
