//! Field-by-field editing of a [`DateTime`].
//!
//! A [`FieldEditor`] walks a fixed sequence of fields. RIGHT and LEFT step the
//! current field up or down with wraparound, ENTER moves to the next field and
//! reports completion on the last one.

use crate::config::{YEAR_MAX, YEAR_MIN};
use crate::datetime::{DateTime, days_in_month};
use crate::types::Button;

/// A single editable component of a [`DateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditField {
    Hour,
    Minute,
    Second,
    Year,
    Month,
    Date,
    Day,
}

const TIME_FIELDS: [EditField; 7] = [
    EditField::Hour,
    EditField::Minute,
    EditField::Second,
    EditField::Year,
    EditField::Month,
    EditField::Date,
    EditField::Day,
];

const ALARM_FIELDS: [EditField; 3] = [EditField::Hour, EditField::Minute, EditField::Day];

/// Which fields an edit session walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldSequence {
    /// hour, minute, second, year, month, date, day
    Time,
    /// hour, minute, day
    Alarm,
}

impl FieldSequence {
    /// Fields in edit order.
    pub fn fields(self) -> &'static [EditField] {
        match self {
            FieldSequence::Time => &TIME_FIELDS,
            FieldSequence::Alarm => &ALARM_FIELDS,
        }
    }
}

/// Steps `field` of `dt` one unit up, wrapping to the bottom of its range.
///
/// Changing month or year pulls the date back into the new month.
pub fn increment(dt: &mut DateTime, field: EditField) {
    match field {
        EditField::Hour => dt.hours = wrap_up(dt.hours, 0, 23),
        EditField::Minute => dt.minutes = wrap_up(dt.minutes, 0, 59),
        EditField::Second => dt.seconds = wrap_up(dt.seconds, 0, 59),
        EditField::Year => {
            dt.year = if dt.year >= YEAR_MAX || dt.year < YEAR_MIN {
                YEAR_MIN
            } else {
                dt.year + 1
            };
            dt.clamp_date();
        }
        EditField::Month => {
            dt.month = wrap_up(dt.month, 1, 12);
            dt.clamp_date();
        }
        EditField::Date => dt.date = wrap_up(dt.date, 1, days_in_month(dt.month, dt.year)),
        EditField::Day => dt.day = wrap_up(dt.day, 1, 7),
    }
}

/// Steps `field` of `dt` one unit down, wrapping to the top of its range.
///
/// Changing month or year pulls the date back into the new month.
pub fn decrement(dt: &mut DateTime, field: EditField) {
    match field {
        EditField::Hour => dt.hours = wrap_down(dt.hours, 0, 23),
        EditField::Minute => dt.minutes = wrap_down(dt.minutes, 0, 59),
        EditField::Second => dt.seconds = wrap_down(dt.seconds, 0, 59),
        EditField::Year => {
            dt.year = if dt.year <= YEAR_MIN || dt.year > YEAR_MAX {
                YEAR_MAX
            } else {
                dt.year - 1
            };
            dt.clamp_date();
        }
        EditField::Month => {
            dt.month = wrap_down(dt.month, 1, 12);
            dt.clamp_date();
        }
        EditField::Date => dt.date = wrap_down(dt.date, 1, days_in_month(dt.month, dt.year)),
        EditField::Day => dt.day = wrap_down(dt.day, 1, 7),
    }
}

// Out-of-range values wrap as if they were at the nearer end.
fn wrap_up(value: u8, min: u8, max: u8) -> u8 {
    if value >= max || value < min { min } else { value + 1 }
}

fn wrap_down(value: u8, min: u8, max: u8) -> u8 {
    if value <= min || value > max { max } else { value - 1 }
}

/// LCD cell (row, column) just left of `field` on its edit screen.
pub fn cursor_position(sequence: FieldSequence, field: EditField) -> (u8, u8) {
    match (sequence, field) {
        (FieldSequence::Time, EditField::Hour) => (0, 3),
        (FieldSequence::Time, EditField::Minute) => (0, 6),
        (FieldSequence::Time, EditField::Second) => (0, 9),
        (FieldSequence::Time, EditField::Day) => (1, 0),
        (FieldSequence::Time, EditField::Date) => (1, 4),
        (FieldSequence::Time, EditField::Month) => (1, 7),
        (FieldSequence::Time, EditField::Year) => (1, 10),
        (FieldSequence::Alarm, EditField::Hour) => (0, 4),
        (FieldSequence::Alarm, EditField::Minute) => (0, 7),
        (FieldSequence::Alarm, _) => (1, 5),
    }
}

/// Cursor over a [`FieldSequence`].
///
/// The application keeps one editor for time and one for the alarm so the
/// two sessions never share a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEditor {
    sequence: FieldSequence,
    index: usize,
}

impl FieldEditor {
    /// Creates an editor positioned on the first field.
    pub const fn new(sequence: FieldSequence) -> Self {
        Self { sequence, index: 0 }
    }

    /// Moves back to the first field.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The field currently being edited.
    pub fn field(&self) -> EditField {
        self.sequence.fields()[self.index]
    }

    /// The sequence this editor walks.
    pub fn sequence(&self) -> FieldSequence {
        self.sequence
    }

    /// Returns true if the cursor is on the last field of the sequence.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.sequence.fields().len()
    }

    /// LCD cell for the current field.
    pub fn cursor_position(&self) -> (u8, u8) {
        cursor_position(self.sequence, self.field())
    }

    /// Applies one button to `dt`.
    ///
    /// Returns true when ENTER is pressed on the last field. The cursor then
    /// stays where it is; call [`FieldEditor::reset`] before reusing it.
    pub fn advance(&mut self, dt: &mut DateTime, button: Option<Button>) -> bool {
        match button {
            Some(Button::Enter) => {
                if self.is_last() {
                    return true;
                }
                self.index += 1;
            }
            Some(Button::Right) => increment(dt, self.field()),
            Some(Button::Left) => decrement(dt, self.field()),
            Some(Button::Menu) | None => {}
        }
        false
    }
}
