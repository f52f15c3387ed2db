//! DS3231 real-time clock over I²C.
//!
//! Timekeeping registers 0x00-0x06 hold seconds, minutes, hours, weekday,
//! date, month and a two-digit year, all BCD. Alarm 1 lives at 0x07-0x0A and
//! is used in day-of-week mode (DY bit set), matching on hours, minutes and
//! weekday with seconds pinned to zero.

use embedded_hal::i2c::I2c;

use super::{bcd_to_dec, dec_to_bcd};
use crate::app::Rtc;
use crate::config::{DS3231_ADDRESS, YEAR_MIN};
use crate::datetime::DateTime;

const REG_SECONDS: u8 = 0x00;
const REG_ALARM1: u8 = 0x07;

/// DY/DT bit of the alarm day register: match on weekday instead of date.
const ALARM_DAY_OF_WEEK: u8 = 0x40;

/// DS3231 driver owning its I²C bus handle.
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Creates a driver at the default address. Touches no hardware.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DS3231_ADDRESS)
    }

    /// Creates a driver at a custom 7-bit address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Rtc for Ds3231<I2C> {
    type Error = I2C::Error;

    fn time(&mut self) -> Result<DateTime, Self::Error> {
        let mut regs = [0u8; 7];
        self.i2c.write_read(self.address, &[REG_SECONDS], &mut regs)?;

        Ok(DateTime {
            seconds: bcd_to_dec(regs[0] & 0x7F),
            minutes: bcd_to_dec(regs[1] & 0x7F),
            hours: bcd_to_dec(regs[2] & 0x3F),
            day: regs[3] & 0x07,
            date: bcd_to_dec(regs[4] & 0x3F),
            month: bcd_to_dec(regs[5] & 0x1F),
            year: YEAR_MIN + bcd_to_dec(regs[6]) as u16,
        })
    }

    fn set_time(&mut self, time: &DateTime) -> Result<(), Self::Error> {
        let year = time.year.saturating_sub(YEAR_MIN).min(99) as u8;
        self.i2c.write(
            self.address,
            &[
                REG_SECONDS,
                dec_to_bcd(time.seconds),
                dec_to_bcd(time.minutes),
                dec_to_bcd(time.hours),
                time.day,
                dec_to_bcd(time.date),
                dec_to_bcd(time.month),
                dec_to_bcd(year),
            ],
        )
    }

    fn alarm(&mut self) -> Result<DateTime, Self::Error> {
        let mut regs = [0u8; 4];
        self.i2c.write_read(self.address, &[REG_ALARM1], &mut regs)?;

        Ok(DateTime {
            seconds: bcd_to_dec(regs[0] & 0x7F),
            minutes: bcd_to_dec(regs[1] & 0x7F),
            hours: bcd_to_dec(regs[2] & 0x3F),
            day: regs[3] & 0x0F,
            ..DateTime::DEFAULT
        })
    }

    fn set_alarm(&mut self, alarm: &DateTime) -> Result<(), Self::Error> {
        self.i2c.write(
            self.address,
            &[
                REG_ALARM1,
                0x00,
                dec_to_bcd(alarm.minutes),
                dec_to_bcd(alarm.hours),
                ALARM_DAY_OF_WEEK | (alarm.day & 0x0F),
            ],
        )
    }
}
