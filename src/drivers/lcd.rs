//! HD44780 16x2 character LCD behind a PCF8574 I²C expander.
//!
//! The expander drives the LCD in 4-bit mode: each byte goes out as two
//! nibbles on P4-P7, each latched by a high-then-low pulse on EN, so one byte
//! costs one 4-byte I²C write. The low expander bits carry RS, RW, EN and the
//! backlight switch.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{LCD_ADDRESS, LCD_COLUMNS};
use crate::screen::CharDisplay;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
/// Display on, cursor on, cursor blinking.
const CMD_DISPLAY_ON: u8 = 0x0F;
/// 4-bit bus, two lines, 5x8 font.
const CMD_FUNCTION_SET: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW1_OFFSET: u8 = 0x40;

/// LCD driver owning its I²C bus handle and a blocking delay.
pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd<I2C, D> {
    /// Creates a driver at the default address. Call
    /// [`CharDisplay::init`] before writing.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, LCD_ADDRESS)
    }

    /// Creates a driver at a custom 7-bit address.
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Gives the bus and delay back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // Single high nibble, used while the controller is still in 8-bit mode.
    fn write_nibble(&mut self, nibble: u8) -> Result<(), I2C::Error> {
        let data = (nibble << 4) | BACKLIGHT;
        self.i2c.write(self.address, &[data | EN, data])
    }

    fn send(&mut self, byte: u8, rs: u8) -> Result<(), I2C::Error> {
        let high = (byte & 0xF0) | rs | BACKLIGHT;
        let low = ((byte << 4) & 0xF0) | rs | BACKLIGHT;
        self.i2c
            .write(self.address, &[high | EN, high, low | EN, low])
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.send(cmd, 0)
    }

    fn write_str(&mut self, text: &str) -> Result<(), I2C::Error> {
        for byte in text.bytes() {
            self.send(byte, RS)?;
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> CharDisplay for Lcd<I2C, D> {
    type Error = I2C::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.delay.delay_ms(50);

        // Force 8-bit mode three times, then drop to 4-bit.
        for _ in 0..3 {
            self.write_nibble(0x3)?;
            self.delay.delay_ms(5);
        }
        self.write_nibble(0x2)?;
        self.delay.delay_ms(1);

        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_ENTRY_INCREMENT)?;
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn clear_write(&mut self, text: &str, row: u8, col: u8) -> Result<(), Self::Error> {
        self.set_cursor(row, 0)?;
        for _ in 0..LCD_COLUMNS {
            self.send(b' ', RS)?;
        }
        self.set_cursor(row, col)?;
        self.write_str(text)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        let address = if row == 0 { col } else { ROW1_OFFSET + col };
        self.command(CMD_SET_DDRAM | address)
    }
}
