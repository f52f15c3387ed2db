//! Three-option menu carousel.

use crate::types::Button;

/// Entries of the menu, in carousel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOption {
    /// Back to the clock.
    ShowTime,
    /// Edit date and time.
    SetTime,
    /// Edit the alarm.
    SetAlarm,
}

impl MenuOption {
    /// The option to the right, wrapping around.
    pub fn next(self) -> Self {
        match self {
            MenuOption::ShowTime => MenuOption::SetTime,
            MenuOption::SetTime => MenuOption::SetAlarm,
            MenuOption::SetAlarm => MenuOption::ShowTime,
        }
    }

    /// The option to the left, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            MenuOption::ShowTime => MenuOption::SetAlarm,
            MenuOption::SetTime => MenuOption::ShowTime,
            MenuOption::SetAlarm => MenuOption::SetTime,
        }
    }
}

/// Menu state: which option is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    option: MenuOption,
}

impl Menu {
    /// Creates a menu on [`MenuOption::ShowTime`].
    pub const fn new() -> Self {
        Self {
            option: MenuOption::ShowTime,
        }
    }

    /// Goes back to [`MenuOption::ShowTime`].
    pub fn reset(&mut self) {
        self.option = MenuOption::ShowTime;
    }

    /// The highlighted option.
    pub fn option(&self) -> MenuOption {
        self.option
    }

    /// Applies one button.
    ///
    /// RIGHT/LEFT rotate the carousel. ENTER returns the highlighted option
    /// for the caller to act on. Anything else is ignored.
    pub fn handle(&mut self, button: Option<Button>) -> Option<MenuOption> {
        match button {
            Some(Button::Right) => {
                self.option = self.option.next();
                debug!("menu -> {}", self.option);
                None
            }
            Some(Button::Left) => {
                self.option = self.option.prev();
                debug!("menu -> {}", self.option);
                None
            }
            Some(Button::Enter) => Some(self.option),
            Some(Button::Menu) | None => None,
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
