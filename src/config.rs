//! Application-wide constants and compile-time configuration.
//!
//! Timing parameters, display geometry, bus addresses and the button wiring
//! live here so they can be tuned in one place.

use crate::types::{Button, PinMap};

// Input

/// Settle window for the interrupt-driven button debouncer (ms).
///
/// Must exceed worst-case contact bounce (5-20 ms) with margin.
pub const DEBOUNCE_MS: u64 = 40;

/// Press/release confirmation delay for the polled auxiliary key (ms).
pub const KEY_DEBOUNCE_MS: u64 = 40;

/// Storage slots of the button event queue.
///
/// The ring keeps one slot free, so this holds 100 pending events. Far larger
/// than human input rates require.
pub const EVENT_QUEUE_SIZE: usize = 101;

/// Pin line to logical button wiring (active-low, pulled up, falling edge).
///
///   RIGHT → PA6
///   MENU  → PA7
///   LEFT  → PA8
///   ENTER → PA9
pub const DEFAULT_PIN_MAP: PinMap<u16, 4> = PinMap::new([
    (6, Button::Right),
    (7, Button::Menu),
    (8, Button::Left),
    (9, Button::Enter),
]);

// Application

/// How long a "saved" confirmation stays on screen (ms).
pub const NOTICE_MS: u64 = 1000;

/// Lowest year the year field can be edited to.
pub const YEAR_MIN: u16 = 2000;

/// Highest year the year field can be edited to. The RTC keeps a two-digit
/// year on top of [`YEAR_MIN`].
pub const YEAR_MAX: u16 = 2099;

// Display

/// Character columns per LCD row.
pub const LCD_COLUMNS: usize = 16;

/// LCD rows.
pub const LCD_ROWS: u8 = 2;

// Bus addresses (7-bit)

/// DS3231 real-time clock.
pub const DS3231_ADDRESS: u8 = 0x68;

/// PCF8574 expander driving the LCD.
pub const LCD_ADDRESS: u8 = 0x27;
