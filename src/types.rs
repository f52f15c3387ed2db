//! Core input types.

/// Raw id that matches no button. Glue code that shuttles raw ids uses it as
/// the "no event" value; the core itself uses `Option::<Button>::None`.
pub const NO_BUTTON: u8 = 0;

/// A logical push-button, decoupled from the pin it is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    /// Next option / increment field.
    Right = 1,

    /// Previous option / decrement field.
    Left = 2,

    /// Open the menu from any mode.
    Menu = 3,

    /// Confirm option / move to next field.
    Enter = 4,
}

impl Button {
    /// All buttons, in [`Button::index`] order.
    pub const ALL: [Button; 4] = [Button::Right, Button::Left, Button::Menu, Button::Enter];

    /// Raw, non-zero id of this button.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Button for a raw id. [`NO_BUTTON`] and unknown ids map to `None`.
    pub const fn from_id(id: u8) -> Option<Button> {
        match id {
            1 => Some(Button::Right),
            2 => Some(Button::Left),
            3 => Some(Button::Menu),
            4 => Some(Button::Enter),
            _ => None,
        }
    }

    /// Dense index 0..4, for per-button tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

/// Explicit pin-to-button wiring table.
///
/// Resolved once at the input boundary so nothing past the interrupt handler
/// ever sees a hardware pin number.
///
/// # Type Parameters
/// * `P` - Pin identifier as the HAL reports it (line number, pin mask, ...)
/// * `N` - Number of wired buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap<P, const N: usize> {
    entries: [(P, Button); N],
}

impl<P: Copy + PartialEq, const N: usize> PinMap<P, N> {
    /// Creates a table from `(pin, button)` pairs.
    pub const fn new(entries: [(P, Button); N]) -> Self {
        Self { entries }
    }

    /// Returns the button wired to `pin`, if any.
    pub fn resolve(&self, pin: P) -> Option<Button> {
        self.entries
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|&(_, button)| button)
    }

    /// Returns the pin a button is wired to, if any.
    pub fn pin_of(&self, button: Button) -> Option<P> {
        self.entries
            .iter()
            .find(|(_, b)| *b == button)
            .map(|&(pin, _)| pin)
    }
}
