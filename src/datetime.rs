//! Calendar date/time value and its Gregorian rules.

use crate::config::{YEAR_MAX, YEAR_MIN};

/// Spanish three-letter weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Lun", "Mar", "Mie", "Jue", "Vie", "Sab"];

/// A wall-clock date and time as kept by the RTC.
///
/// Day-of-week is stored independently of the date, like the RTC does; it is
/// not derived from `date`/`month`/`year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// 0-59
    pub seconds: u8,
    /// 0-59
    pub minutes: u8,
    /// 0-23
    pub hours: u8,
    /// Day of week, 1-7 with 1 = Sunday.
    pub day: u8,
    /// Day of month, 1-[`days_in_month`].
    pub date: u8,
    /// 1-12
    pub month: u8,
    /// Absolute year, e.g. 2025.
    pub year: u16,
}

impl DateTime {
    /// Saturday 2000-01-01 00:00:00, the start of the RTC's year range.
    pub const DEFAULT: DateTime = DateTime {
        seconds: 0,
        minutes: 0,
        hours: 0,
        day: 7,
        date: 1,
        month: 1,
        year: YEAR_MIN,
    };

    /// Creates a date/time from its fields. Values are taken as given.
    pub const fn new(
        year: u16,
        month: u8,
        date: u8,
        day: u8,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            day,
            date,
            month,
            year,
        }
    }

    /// Returns true if every field is inside its range and the date exists
    /// in its month.
    pub fn is_valid(&self) -> bool {
        self.seconds <= 59
            && self.minutes <= 59
            && self.hours <= 23
            && (1..=7).contains(&self.day)
            && (1..=12).contains(&self.month)
            && (YEAR_MIN..=YEAR_MAX).contains(&self.year)
            && (1..=days_in_month(self.month, self.year)).contains(&self.date)
    }

    /// Pulls `date` back to the last day of its month if it overshoots.
    ///
    /// Returns true if the date was changed.
    pub fn clamp_date(&mut self) -> bool {
        let max = days_in_month(self.month, self.year);
        if self.date > max {
            self.date = max;
            true
        } else {
            false
        }
    }

    /// Alarm presence: an alarm slot counts as set when its day-of-week is
    /// 1-7. A blank alarm register reads back as day 0.
    pub fn is_alarm_set(&self) -> bool {
        (1..=7).contains(&self.day)
    }

    /// Spanish abbreviation of the day of week, `"---"` when out of range.
    pub fn weekday_name(&self) -> &'static str {
        match self.day {
            1..=7 => WEEKDAY_NAMES[(self.day - 1) as usize],
            _ => "---",
        }
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Gregorian leap year: divisible by 400, or by 4 and not by 100.
pub const fn is_leap_year(year: u16) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Number of days in `month` (1-12) of `year`.
///
/// Months outside 1-12 report 31 so a corrupt month never shrinks a date.
pub const fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
