//! Button event queue between interrupt context and the main loop.
//!
//! [`EventQueue`] is a fixed-capacity FIFO over `heapless::spsc::Queue`.
//! [`SharedEventQueue`] wraps it in a `critical_section::Mutex` so it can
//! live in a `static`, be filled from a pin interrupt and drained by the
//! polled application loop. Every index update happens inside a critical
//! section, so the queue is sound on targets without atomic read-modify-write.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::spsc::Queue;

use crate::types::Button;

/// Source of button events for the application tick.
pub trait EventSource {
    /// Takes the next pending event, `None` if there is none.
    fn next_event(&self) -> Option<Button>;
}

/// Bounded FIFO of button events. Drops new events when full.
///
/// # Type Parameters
/// * `N` - Storage slots (see [`EventQueue::capacity`] for usable slots)
pub struct EventQueue<const N: usize> {
    inner: Queue<Button, N>,
}

impl<const N: usize> EventQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Queue::new(),
        }
    }

    /// Appends an event.
    ///
    /// Never blocks. Returns false and leaves the queue unchanged when it is
    /// full; the event is dropped.
    pub fn enqueue(&mut self, button: Button) -> bool {
        match self.inner.enqueue(button) {
            Ok(()) => true,
            Err(dropped) => {
                warn!("event queue full, dropping {}", dropped);
                false
            }
        }
    }

    /// Removes the oldest event, `None` when empty.
    pub fn dequeue(&mut self) -> Option<Button> {
        self.inner.dequeue()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the next enqueue would be dropped.
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Maximum number of events the queue holds at once.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`EventQueue`] that can be shared between an interrupt handler and the
/// main loop through a `static`.
///
/// ```
/// use rtc_alarm_clock::{Button, EventSource, SharedEventQueue};
///
/// static EVENTS: SharedEventQueue<8> = SharedEventQueue::new();
///
/// // Pin interrupt, after debouncing:
/// EVENTS.enqueue(Button::Menu);
///
/// // Main loop:
/// assert_eq!(EVENTS.next_event(), Some(Button::Menu));
/// assert_eq!(EVENTS.next_event(), None);
/// ```
pub struct SharedEventQueue<const N: usize> {
    inner: Mutex<RefCell<EventQueue<N>>>,
}

impl<const N: usize> SharedEventQueue<N> {
    /// Creates an empty queue, usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(EventQueue::new())),
        }
    }

    /// Appends a confirmed button press. Returns false if it was dropped.
    pub fn enqueue(&self, button: Button) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).enqueue(button))
    }

    /// Removes the oldest event, `None` when empty.
    pub fn dequeue(&self) -> Option<Button> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).dequeue())
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    /// Returns true if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of events the queue holds at once.
    pub fn capacity(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).capacity())
    }
}

impl<const N: usize> Default for SharedEventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSource for SharedEventQueue<N> {
    fn next_event(&self) -> Option<Button> {
        self.dequeue()
    }
}
