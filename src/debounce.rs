//! Push-button debouncing.
//!
//! Two state machines built on the same [`Delay`] timer:
//!
//! - [`EdgeDebouncer`]: the four menu buttons. Driven from interrupt context
//!   by pin-edge callbacks. The first edge arms a settle timer; the first
//!   callback after the timer elapses re-checks the pin and confirms the press
//!   (or discards it as noise). Timing from the first edge instead of counting
//!   stable samples makes it independent of how often callbacks arrive.
//!   A confirmed button stays latched until it is seen released or a new
//!   press edge arrives.
//! - [`KeyDebouncer`]: a single auxiliary key sampled every main-loop tick,
//!   with confirmed press and release edges.

use crate::config::{DEBOUNCE_MS, KEY_DEBOUNCE_MS};
use crate::delay::Delay;
use crate::time::TimeInstant;
use crate::types::{Button, PinMap};

/// State of one button in an [`EdgeDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Not pressed. The next asserted edge arms the settle timer.
    Idle,

    /// Settle timer running. Edges are ignored until it elapses.
    Debouncing,

    /// Press reported. A released level returns to idle; an asserted edge
    /// starts the next press.
    Confirmed,
}

#[derive(Clone, Copy)]
struct DebounceRecord<I: TimeInstant> {
    state: DebounceState,
    delay: Delay<I>,
}

impl<I: TimeInstant> DebounceRecord<I> {
    fn new(window_ms: u64) -> Self {
        Self {
            state: DebounceState::Idle,
            delay: Delay::from_millis(window_ms),
        }
    }

    fn reset(&mut self) {
        self.state = DebounceState::Idle;
        self.delay.stop();
    }
}

/// Debouncer for the four logical buttons, fed by pin-edge interrupts.
///
/// Each button is independent. A confirmed press is reported exactly once:
/// the record latches in [`DebounceState::Confirmed`] with its timer stopped.
/// A callback that sees the pin released returns it to
/// [`DebounceState::Idle`]. An asserted edge in that state can only follow a
/// release the interrupt never reported (falling-edge wiring), so it arms the
/// timer for a new press. [`EdgeDebouncer::service`] never re-arms a latched
/// button, so holding one never repeats it.
///
/// All methods are meant to run in the interrupt context that owns the
/// debouncer; the only thing that should leave that context is the returned
/// [`Button`], pushed onto the event queue.
pub struct EdgeDebouncer<I: TimeInstant> {
    records: [DebounceRecord<I>; 4],
}

impl<I: TimeInstant> EdgeDebouncer<I> {
    /// Creates a debouncer with the default settle window.
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_MS)
    }

    /// Creates a debouncer with a custom settle window in milliseconds.
    pub fn with_window(window_ms: u64) -> Self {
        Self {
            records: [DebounceRecord::new(window_ms); 4],
        }
    }

    /// Handles a callback for `button`.
    ///
    /// `asserted` is the pin level read during the callback (true = pressed,
    /// i.e. low for an active-low button). Returns the button when this
    /// callback confirms a press.
    pub fn on_edge(&mut self, button: Button, asserted: bool, now: I) -> Option<Button> {
        let record = &mut self.records[button.index()];

        match record.state {
            DebounceState::Idle => {
                if asserted {
                    record.delay.start(now);
                    record.state = DebounceState::Debouncing;
                }
                None
            }
            DebounceState::Debouncing => {
                if !record.delay.has_elapsed(now) {
                    return None;
                }

                record.delay.stop();
                if asserted {
                    trace!("button {} confirmed", button);
                    record.state = DebounceState::Confirmed;
                    Some(button)
                } else {
                    trace!("button {} rejected as noise", button);
                    record.state = DebounceState::Idle;
                    None
                }
            }
            DebounceState::Confirmed => {
                if asserted {
                    record.delay.start(now);
                    record.state = DebounceState::Debouncing;
                } else {
                    record.state = DebounceState::Idle;
                }
                None
            }
        }
    }

    /// Resolves `pin` through `map` and handles the callback.
    ///
    /// Edges on pins that are not in the map are ignored.
    pub fn on_pin_edge<P: Copy + PartialEq, const N: usize>(
        &mut self,
        map: &PinMap<P, N>,
        pin: P,
        asserted: bool,
        now: I,
    ) -> Option<Button> {
        let button = map.resolve(pin)?;
        self.on_edge(button, asserted, now)
    }

    /// Runs the settle check for every button that is debouncing, and
    /// releases the latch of confirmed buttons that are no longer held.
    ///
    /// Call from a periodic timer interrupt so a clean press, which produces
    /// a single edge and nothing after it, still gets confirmed. `read_pin`
    /// returns the current asserted level of a button; `emit` receives each
    /// confirmed press.
    pub fn service<R, E>(&mut self, now: I, mut read_pin: R, mut emit: E)
    where
        R: FnMut(Button) -> bool,
        E: FnMut(Button),
    {
        for button in Button::ALL {
            match self.records[button.index()].state {
                DebounceState::Idle => {}
                DebounceState::Debouncing => {
                    let asserted = read_pin(button);
                    if let Some(confirmed) = self.on_edge(button, asserted, now) {
                        emit(confirmed);
                    }
                }
                // A level sample is not an edge: only unlatch here.
                DebounceState::Confirmed => {
                    if !read_pin(button) {
                        self.records[button.index()].state = DebounceState::Idle;
                    }
                }
            }
        }
    }

    /// Current state of a button.
    pub fn state(&self, button: Button) -> DebounceState {
        self.records[button.index()].state
    }

    /// Returns every button to idle, dropping presses in progress.
    pub fn reset(&mut self) {
        for record in self.records.iter_mut() {
            record.reset();
        }
    }
}

impl<I: TimeInstant> Default for EdgeDebouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a [`KeyDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Key up.
    Released,
    /// Went low, waiting for the press to settle.
    Falling,
    /// Key down.
    Pressed,
    /// Went high, waiting for the release to settle.
    Rising,
}

/// A confirmed transition of a [`KeyDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEdge {
    /// The key has been held for the full confirm delay.
    Pressed,
    /// The key has been up for the full confirm delay.
    Released,
}

/// Polled debouncer for a single active-low key.
///
/// Sample the pin once per tick with [`KeyDebouncer::update`]. A level change
/// arms a confirm delay; the transition is accepted only if the level is
/// still the same when the delay runs out, otherwise the key falls back to
/// its previous stable state.
pub struct KeyDebouncer<I: TimeInstant> {
    state: KeyState,
    delay: Delay<I>,
    key_pressed: bool,
}

impl<I: TimeInstant> KeyDebouncer<I> {
    /// Creates a released key with the default confirm delay.
    pub fn new() -> Self {
        Self::with_delay(KEY_DEBOUNCE_MS)
    }

    /// Creates a released key with a custom confirm delay in milliseconds.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            state: KeyState::Released,
            delay: Delay::from_millis(delay_ms),
            key_pressed: false,
        }
    }

    /// Feeds one pin sample. `is_low` is true while the key is held.
    ///
    /// Returns the edge when a press or release is confirmed. Drive an
    /// indicator LED from these edges if the board has one.
    pub fn update(&mut self, is_low: bool, now: I) -> Option<KeyEdge> {
        match self.state {
            KeyState::Released => {
                if is_low {
                    self.delay.start(now);
                    self.state = KeyState::Falling;
                }
                None
            }
            KeyState::Falling => {
                if !is_low {
                    self.delay.stop();
                    self.state = KeyState::Released;
                    None
                } else if self.delay.has_elapsed(now) {
                    self.delay.stop();
                    self.state = KeyState::Pressed;
                    self.key_pressed = true;
                    Some(KeyEdge::Pressed)
                } else {
                    None
                }
            }
            KeyState::Pressed => {
                if !is_low {
                    self.delay.start(now);
                    self.state = KeyState::Rising;
                }
                None
            }
            KeyState::Rising => {
                if is_low {
                    self.delay.stop();
                    self.state = KeyState::Pressed;
                    None
                } else if self.delay.has_elapsed(now) {
                    self.delay.stop();
                    self.state = KeyState::Released;
                    Some(KeyEdge::Released)
                } else {
                    None
                }
            }
        }
    }

    /// Returns true once per confirmed press, then clears itself.
    pub fn read_key(&mut self) -> bool {
        core::mem::take(&mut self.key_pressed)
    }

    /// Current state.
    pub fn state(&self) -> KeyState {
        self.state
    }
}

impl<I: TimeInstant> Default for KeyDebouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}
