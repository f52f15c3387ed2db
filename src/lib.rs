#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`App`**: The clock application. Owns the RTC and display, runs the mode state machine one tick at a time
//! - **`Rtc`**: Trait to implement for your real-time clock
//! - **`CharDisplay`**: Trait to implement for your character display
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`EdgeDebouncer`**: Turns noisy button interrupts into clean presses
//! - **`SharedEventQueue`**: Interrupt-safe FIFO carrying presses to the main loop
//! - **`FieldEditor`**: Walks the fields of a `DateTime` under RIGHT/LEFT/ENTER
//! - **`Delay`**: Non-blocking one-shot timer
//!
//! `Ds3231` and `Lcd` implement `Rtc` and `CharDisplay` for the reference
//! board on top of `embedded-hal` I²C.

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod datetime;
pub mod debounce;
pub mod delay;
pub mod drivers;
pub mod field_edit;
pub mod menu;
pub mod queue;
pub mod screen;
pub mod time;
pub mod types;

pub use app::{App, AppError, AppMode, Rtc};
pub use datetime::{DateTime, days_in_month, is_leap_year};
pub use debounce::{DebounceState, EdgeDebouncer, KeyDebouncer, KeyEdge, KeyState};
pub use delay::{Delay, DelayError};
pub use drivers::{Ds3231, Lcd};
pub use field_edit::{EditField, FieldEditor, FieldSequence};
pub use menu::{Menu, MenuOption};
pub use queue::{EventQueue, EventSource, SharedEventQueue};
pub use screen::{CharDisplay, Line, Screen, ScreenCache};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{Button, NO_BUTTON, PinMap};
