//! Drivers for the board's I²C peripherals.
//!
//! Both are generic over [`embedded_hal::i2c::I2c`], so the same code runs on
//! any HAL and against a mock bus in tests.

pub mod ds3231;
pub mod lcd;

pub use ds3231::Ds3231;
pub use lcd::Lcd;

/// Converts a packed BCD byte to binary.
pub const fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Converts a binary value below 100 to packed BCD.
pub const fn dec_to_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}
