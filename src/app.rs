//! Top-level clock application.
//!
//! Provides [`App`], which owns the RTC and display drivers plus all
//! date/time state, and runs the mode state machine one tick at a time. Also
//! defines the [`Rtc`] trait for clock hardware abstraction.

use crate::config::NOTICE_MS;
use crate::datetime::DateTime;
use crate::delay::Delay;
use crate::field_edit::{EditField, FieldEditor, FieldSequence};
use crate::menu::{Menu, MenuOption};
use crate::queue::EventSource;
use crate::screen::{self, CharDisplay, Screen, ScreenCache};
use crate::time::{TimeInstant, TimeSource};
use crate::types::Button;

/// Trait for abstracting a battery-backed real-time clock.
///
/// Implement this for your RTC chip. The application reads the time every
/// tick while the clock is shown, and writes only when the user commits an
/// edit. Transport errors are passed straight up; the application does not
/// retry them.
pub trait Rtc {
    /// Transport error type.
    type Error;

    /// Reads the current date and time.
    fn time(&mut self) -> Result<DateTime, Self::Error>;

    /// Sets the date and time.
    fn set_time(&mut self, time: &DateTime) -> Result<(), Self::Error>;

    /// Reads the alarm slot. Only hours, minutes and day-of-week are
    /// meaningful; a blank slot reads back with day-of-week 0.
    fn alarm(&mut self) -> Result<DateTime, Self::Error>;

    /// Programs the alarm slot from hours, minutes and day-of-week.
    fn set_alarm(&mut self, alarm: &DateTime) -> Result<(), Self::Error>;
}

/// The top-level mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppMode {
    /// Current time and date on screen, refreshed from the RTC every tick.
    ShowTime,
    /// Editing date and time field by field.
    SetTime,
    /// Editing the alarm (hour, minute, weekday).
    SetAlarm,
    /// Browsing the option carousel.
    Menu,
}

/// Errors that end an application tick.
///
/// Both variants are hardware faults the application cannot recover from.
/// The main loop should hand them to its fatal error handler instead of
/// carrying on with possibly corrupt time data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppError<RE, DE> {
    /// The RTC transaction failed.
    Rtc(RE),
    /// The display transaction failed.
    Display(DE),
}

impl<RE: core::fmt::Debug, DE: core::fmt::Debug> core::fmt::Display for AppError<RE, DE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AppError::Rtc(err) => write!(f, "RTC transaction failed: {:?}", err),
            AppError::Display(err) => write!(f, "display transaction failed: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<RE: core::fmt::Debug, DE: core::fmt::Debug> std::error::Error for AppError<RE, DE> {}

type AppResult<R, D> = Result<(), AppError<<R as Rtc>::Error, <D as CharDisplay>::Error>>;

/// The alarm clock application.
///
/// Create it once at startup, call [`App::init`], then call [`App::tick`]
/// once per main-loop iteration. Nothing in here blocks: confirmation
/// messages are timed with a [`Delay`] polled on each tick.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `R` - RTC implementation type
/// * `D` - Display implementation type
/// * `T` - Time source implementation type
pub struct App<'t, I: TimeInstant, R: Rtc, D: CharDisplay, T: TimeSource<I>> {
    rtc: R,
    display: D,
    time_source: &'t T,
    mode: AppMode,
    menu: Menu,
    now: DateTime,
    time_edit: DateTime,
    alarm_edit: DateTime,
    alarm: DateTime,
    alarm_set: bool,
    time_editor: FieldEditor,
    alarm_editor: FieldEditor,
    cache: ScreenCache,
    notice: Delay<I>,
}

impl<'t, I: TimeInstant, R: Rtc, D: CharDisplay, T: TimeSource<I>> App<'t, I, R, D, T> {
    /// Creates the application in [`AppMode::ShowTime`]. Touches no hardware.
    pub fn new(rtc: R, display: D, time_source: &'t T) -> Self {
        Self {
            rtc,
            display,
            time_source,
            mode: AppMode::ShowTime,
            menu: Menu::new(),
            now: DateTime::DEFAULT,
            time_edit: DateTime::DEFAULT,
            alarm_edit: DateTime::DEFAULT,
            alarm: DateTime::DEFAULT,
            alarm_set: false,
            time_editor: FieldEditor::new(FieldSequence::Time),
            alarm_editor: FieldEditor::new(FieldSequence::Alarm),
            cache: ScreenCache::new(),
            notice: Delay::from_millis(NOTICE_MS),
        }
    }

    /// One-time setup: initializes and blanks the display, loads the stored
    /// alarm and enters [`AppMode::ShowTime`].
    pub fn init(&mut self) -> AppResult<R, D> {
        self.display.init().map_err(Self::display_error)?;
        self.cache.invalidate();
        self.draw(&Screen::blank())?;

        self.menu.reset();
        self.time_editor.reset();
        self.alarm_editor.reset();
        self.notice.stop();

        self.alarm = self.rtc.alarm().map_err(Self::rtc_error)?;
        self.alarm_set = self.alarm.is_alarm_set();
        self.mode = AppMode::ShowTime;

        info!("clock ready, alarm set: {}", self.alarm_set);
        Ok(())
    }

    /// Runs one main-loop iteration.
    ///
    /// While a confirmation message is on screen only its timer is polled and
    /// pending events stay queued. Otherwise one event is taken from `events`
    /// (none is fine) and handled.
    pub fn tick<E: EventSource + ?Sized>(&mut self, events: &E) -> AppResult<R, D> {
        if self.notice.is_running() {
            if !self.notice.has_elapsed(self.time_source.now()) {
                return Ok(());
            }
            self.notice.stop();
            self.menu.reset();
            self.set_mode(AppMode::ShowTime);
        }

        self.handle(events.next_event())
    }

    /// Dispatches one button, or an idle tick for `None`, to the current
    /// mode. Ignored while a confirmation message is on screen.
    pub fn handle(&mut self, button: Option<Button>) -> AppResult<R, D> {
        if self.notice.is_running() {
            return Ok(());
        }

        match self.mode {
            AppMode::ShowTime => {
                if button == Some(Button::Menu) {
                    self.enter_menu()
                } else {
                    self.show_time()
                }
            }
            AppMode::SetTime => {
                if button == Some(Button::Menu) {
                    self.time_editor.reset();
                    self.enter_menu()
                } else {
                    self.edit_time(button)
                }
            }
            AppMode::SetAlarm => {
                if button == Some(Button::Menu) {
                    self.alarm_editor.reset();
                    self.enter_menu()
                } else {
                    self.edit_alarm(button)
                }
            }
            AppMode::Menu => self.browse_menu(button),
        }
    }

    fn show_time(&mut self) -> AppResult<R, D> {
        self.now = self.rtc.time().map_err(Self::rtc_error)?;
        self.draw(&screen::show_time(&self.now, self.alarm_set))
    }

    fn enter_menu(&mut self) -> AppResult<R, D> {
        self.set_mode(AppMode::Menu);
        self.draw(&screen::menu(self.menu.option()))
    }

    fn browse_menu(&mut self, button: Option<Button>) -> AppResult<R, D> {
        match self.menu.handle(button) {
            Some(MenuOption::ShowTime) => {
                self.set_mode(AppMode::ShowTime);
                self.show_time()
            }
            Some(MenuOption::SetTime) => {
                self.now = self.rtc.time().map_err(Self::rtc_error)?;
                self.time_edit = self.now;
                self.time_editor.reset();
                self.set_mode(AppMode::SetTime);
                self.draw_edit(FieldSequence::Time)
            }
            Some(MenuOption::SetAlarm) => {
                self.alarm_edit = DateTime::DEFAULT;
                self.alarm_editor.reset();
                self.set_mode(AppMode::SetAlarm);
                self.draw_edit(FieldSequence::Alarm)
            }
            None => self.draw(&screen::menu(self.menu.option())),
        }
    }

    fn edit_time(&mut self, button: Option<Button>) -> AppResult<R, D> {
        if !self.time_editor.advance(&mut self.time_edit, button) {
            return self.draw_edit(FieldSequence::Time);
        }

        self.rtc.set_time(&self.time_edit).map_err(Self::rtc_error)?;
        info!("time set to {}", self.time_edit);
        self.now = self.time_edit;
        self.time_editor.reset();
        self.show_notice(&screen::time_saved())
    }

    fn edit_alarm(&mut self, button: Option<Button>) -> AppResult<R, D> {
        if !self.alarm_editor.advance(&mut self.alarm_edit, button) {
            return self.draw_edit(FieldSequence::Alarm);
        }

        self.rtc.set_alarm(&self.alarm_edit).map_err(Self::rtc_error)?;
        self.alarm = self.rtc.alarm().map_err(Self::rtc_error)?;
        self.alarm_set = true;
        info!("alarm set to {}", self.alarm);
        self.alarm_editor.reset();
        self.show_notice(&screen::alarm_saved())
    }

    fn draw_edit(&mut self, sequence: FieldSequence) -> AppResult<R, D> {
        let (screen, cursor) = match sequence {
            FieldSequence::Time => (
                screen::edit_time(&self.time_edit),
                self.time_editor.cursor_position(),
            ),
            FieldSequence::Alarm => (
                screen::edit_alarm(&self.alarm_edit),
                self.alarm_editor.cursor_position(),
            ),
        };
        self.draw(&screen)?;
        self.cache
            .place_cursor(&mut self.display, cursor)
            .map_err(Self::display_error)
    }

    fn show_notice(&mut self, screen: &Screen) -> AppResult<R, D> {
        self.draw(screen)?;
        self.notice.start(self.time_source.now());
        Ok(())
    }

    fn draw(&mut self, screen: &Screen) -> AppResult<R, D> {
        self.cache
            .draw(&mut self.display, screen)
            .map(|_| ())
            .map_err(Self::display_error)
    }

    fn rtc_error(err: R::Error) -> AppError<R::Error, D::Error> {
        error!("RTC transaction failed");
        AppError::Rtc(err)
    }

    fn display_error(err: D::Error) -> AppError<R::Error, D::Error> {
        error!("display transaction failed");
        AppError::Display(err)
    }

    fn set_mode(&mut self, mode: AppMode) {
        if self.mode != mode {
            info!("mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Returns the highlighted menu option.
    pub fn menu_option(&self) -> MenuOption {
        self.menu.option()
    }

    /// Returns true while a confirmation message is on screen.
    pub fn is_showing_notice(&self) -> bool {
        self.notice.is_running()
    }

    /// The time last read from (or written to) the RTC.
    pub fn current_time(&self) -> &DateTime {
        &self.now
    }

    /// The date/time being edited in [`AppMode::SetTime`].
    pub fn time_edit(&self) -> &DateTime {
        &self.time_edit
    }

    /// The alarm being edited in [`AppMode::SetAlarm`].
    pub fn alarm_edit(&self) -> &DateTime {
        &self.alarm_edit
    }

    /// The alarm as stored in the RTC.
    pub fn alarm(&self) -> &DateTime {
        &self.alarm
    }

    /// Returns true if an alarm is set (shown as the `A` marker).
    pub fn is_alarm_set(&self) -> bool {
        self.alarm_set
    }

    /// The field under the cursor of the time editor.
    pub fn time_field(&self) -> EditField {
        self.time_editor.field()
    }

    /// The field under the cursor of the alarm editor.
    pub fn alarm_field(&self) -> EditField {
        self.alarm_editor.field()
    }

    /// Returns a reference to the RTC driver.
    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    /// Returns a reference to the display driver.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Consumes the application and returns its drivers.
    pub fn release(self) -> (R, D) {
        (self.rtc, self.display)
    }
}
