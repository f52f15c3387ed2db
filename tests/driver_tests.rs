//! Integration tests for the DS3231 and LCD drivers against a mock I²C bus

mod common;
use common::*;

use rtc_alarm_clock::config::{DS3231_ADDRESS, LCD_ADDRESS};
use rtc_alarm_clock::{App, AppMode, CharDisplay, DateTime, Ds3231, Lcd, Rtc, SharedEventQueue};

const WED_REGISTERS: [u8; 7] = [0x30, 0x05, 0x14, 0x04, 0x15, 0x01, 0x25];

#[test]
fn ds3231_reads_bcd_time() {
    let mut rtc = Ds3231::new(MockI2c::with_registers(0x00, &WED_REGISTERS));
    assert_eq!(rtc.time().unwrap(), WED_AFTERNOON);
}

#[test]
fn ds3231_writes_time_in_one_burst() {
    let mut rtc = Ds3231::new(MockI2c::new());
    rtc.set_time(&WED_AFTERNOON).unwrap();

    let bus = rtc.release();
    let mut expected = vec![0x00];
    expected.extend_from_slice(&WED_REGISTERS);
    assert_eq!(bus.writes(), &[(DS3231_ADDRESS, expected)]);
}

#[test]
fn ds3231_alarm_uses_day_of_week_match() {
    let mut rtc = Ds3231::new(MockI2c::new());
    let alarm = DateTime {
        hours: 7,
        minutes: 30,
        day: 2,
        ..BLANK_ALARM
    };
    rtc.set_alarm(&alarm).unwrap();

    let stored = rtc.alarm().unwrap();
    assert_eq!((stored.hours, stored.minutes, stored.day), (7, 30, 2));
    assert_eq!(stored.seconds, 0);
    assert!(stored.is_alarm_set());

    let bus = rtc.release();
    assert_eq!(bus.writes()[0], (DS3231_ADDRESS, vec![0x07, 0x00, 0x30, 0x07, 0x42]));
}

#[test]
fn ds3231_blank_alarm_reads_unset() {
    let mut rtc = Ds3231::new(MockI2c::new());
    assert!(!rtc.alarm().unwrap().is_alarm_set());
}

#[test]
fn ds3231_propagates_bus_errors() {
    let mut bus = MockI2c::new();
    bus.failing = true;
    let mut rtc = Ds3231::new(bus);

    assert_eq!(rtc.time(), Err(MockI2cError));
    assert_eq!(rtc.set_time(&WED_AFTERNOON), Err(MockI2cError));
}

#[test]
fn lcd_init_sequence() {
    let mut lcd = Lcd::new(MockI2c::new(), NoDelay::new());
    lcd.init().unwrap();

    let (bus, delay) = lcd.release();
    let writes: Vec<Vec<u8>> = bus.writes().iter().map(|(_, bytes)| bytes.clone()).collect();

    assert!(bus.writes().iter().all(|(address, _)| *address == LCD_ADDRESS));
    // Three 8-bit wake-ups, then the switch to 4-bit mode
    assert_eq!(writes[0], vec![0x3C, 0x38]);
    assert_eq!(writes[1], vec![0x3C, 0x38]);
    assert_eq!(writes[2], vec![0x3C, 0x38]);
    assert_eq!(writes[3], vec![0x2C, 0x28]);
    // Function set 0x28, display on 0x0F, entry mode 0x06, clear 0x01
    assert_eq!(writes[4], vec![0x2C, 0x28, 0x8C, 0x88]);
    assert_eq!(writes[5], vec![0x0C, 0x08, 0xFC, 0xF8]);
    assert_eq!(writes[6], vec![0x0C, 0x08, 0x6C, 0x68]);
    assert_eq!(writes[7], vec![0x0C, 0x08, 0x1C, 0x18]);
    assert_eq!(writes.len(), 8);

    assert!(delay.total_ns >= 68_000_000);
}

#[test]
fn lcd_cursor_addresses_rows() {
    let mut lcd = Lcd::new(MockI2c::new(), NoDelay::new());
    lcd.set_cursor(0, 3).unwrap();
    lcd.set_cursor(1, 5).unwrap();

    let (bus, _) = lcd.release();
    // 0x83 and 0xC5, high nibble then low nibble, each pulsed on EN
    assert_eq!(bus.writes()[0].1, vec![0x8C, 0x88, 0x3C, 0x38]);
    assert_eq!(bus.writes()[1].1, vec![0xCC, 0xC8, 0x5C, 0x58]);
}

#[test]
fn lcd_clear_write_blanks_row_first() {
    let mut lcd = Lcd::new(MockI2c::new(), NoDelay::new());
    lcd.clear_write("Hi", 0, 3).unwrap();

    let (bus, _) = lcd.release();
    let writes = bus.writes();
    // Cursor home, 16 spaces, cursor to column, 2 characters
    assert_eq!(writes.len(), 1 + 16 + 1 + 2);
    assert_eq!(writes[0].1, vec![0x8C, 0x88, 0x0C, 0x08]);
    assert_eq!(writes[1].1, vec![0x2D, 0x29, 0x0D, 0x09]);
    assert_eq!(writes[17].1, vec![0x8C, 0x88, 0x3C, 0x38]);
    assert_eq!(writes[18].1, vec![0x4D, 0x49, 0x8D, 0x89]);
}

#[test]
fn app_runs_on_real_drivers() {
    let timer = MockTimeSource::new();
    let events = SharedEventQueue::<4>::new();
    let rtc = Ds3231::new(MockI2c::with_registers(0x00, &WED_REGISTERS));
    let lcd = Lcd::new(MockI2c::new(), NoDelay::new());
    let mut app = App::<TestInstant, _, _, MockTimeSource>::new(rtc, lcd, &timer);

    app.init().unwrap();
    app.tick(&events).unwrap();

    assert_eq!(app.mode(), AppMode::ShowTime);
    assert_eq!(app.current_time(), &WED_AFTERNOON);
    assert!(!app.is_alarm_set());

    let (_, lcd) = app.release();
    let (bus, _) = lcd.release();
    assert!(!bus.writes().is_empty());
}
