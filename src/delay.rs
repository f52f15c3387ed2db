//! Single-shot, non-blocking delay.
//!
//! A [`Delay`] is a start instant plus a duration, polled with "has it
//! elapsed?". It never blocks, so the same abstraction serves the debouncers
//! (interrupt context) and the confirmation notice (main loop) without
//! stalling input handling.

use crate::time::{TimeDuration, TimeInstant};

/// Delay operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayError {
    /// The duration of a running delay cannot be changed.
    Running,
}

impl core::fmt::Display for DelayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DelayError::Running => write!(f, "cannot change the duration of a running delay"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DelayError {}

/// A single-shot timer.
///
/// Idle until started; once started it reports elapsed when `now` is at
/// least `duration` past the start instant.
#[derive(Debug, Clone, Copy)]
pub struct Delay<I: TimeInstant> {
    duration: I::Duration,
    started: Option<I>,
}

impl<I: TimeInstant> Delay<I> {
    /// Creates an idle delay.
    pub fn new(duration: I::Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// Creates an idle delay of `millis` milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(I::Duration::from_millis(millis))
    }

    /// Starts (or restarts) the delay at `now`.
    pub fn start(&mut self, now: I) {
        self.started = Some(now);
    }

    /// Stops the delay without it having elapsed.
    pub fn stop(&mut self) {
        self.started = None;
    }

    /// Returns true if the delay has been started and not yet consumed.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Returns the configured duration.
    pub fn duration(&self) -> I::Duration {
        self.duration
    }

    /// Changes the duration of an idle delay.
    pub fn set_duration(&mut self, duration: I::Duration) -> Result<(), DelayError> {
        if self.is_running() {
            return Err(DelayError::Running);
        }
        self.duration = duration;
        Ok(())
    }

    /// Returns true if the delay is running and its duration has passed.
    ///
    /// Does not change state.
    pub fn has_elapsed(&self, now: I) -> bool {
        match self.started {
            Some(start) => now.duration_since(start).as_millis() >= self.duration.as_millis(),
            None => false,
        }
    }

    /// Polls the delay.
    ///
    /// An idle delay is started at `now` and `false` is returned. A running
    /// delay returns `true` exactly once when it has elapsed, and goes idle.
    pub fn read(&mut self, now: I) -> bool {
        match self.started {
            None => {
                self.started = Some(now);
                false
            }
            Some(_) if self.has_elapsed(now) => {
                self.started = None;
                true
            }
            Some(_) => false,
        }
    }

    /// Time left until the delay elapses, or `None` if it is idle.
    pub fn remaining(&self, now: I) -> Option<I::Duration> {
        self.started
            .map(|start| self.duration.saturating_sub(now.duration_since(start)))
    }
}
