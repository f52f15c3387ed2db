//! Shared test infrastructure for rtc-alarm-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation};
use rtc_alarm_clock::{CharDisplay, DateTime, Rtc, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing (milliseconds since boot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock RTC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRtcError;

/// Alarm slot that was never programmed.
pub const BLANK_ALARM: DateTime = DateTime {
    day: 0,
    ..DateTime::DEFAULT
};

/// Mock RTC backed by plain fields.
///
/// State lives in cells so tests can change the clock or inject failures
/// through `App::rtc()` after the mock has been moved into the app.
pub struct MockRtc {
    time: Cell<DateTime>,
    alarm: Cell<DateTime>,
    failing: Cell<bool>,
    time_reads: Cell<usize>,
    time_writes: Cell<usize>,
    alarm_writes: Cell<usize>,
}

impl MockRtc {
    pub fn new(time: DateTime) -> Self {
        Self {
            time: Cell::new(time),
            alarm: Cell::new(BLANK_ALARM),
            failing: Cell::new(false),
            time_reads: Cell::new(0),
            time_writes: Cell::new(0),
            alarm_writes: Cell::new(0),
        }
    }

    pub fn with_alarm(self, alarm: DateTime) -> Self {
        self.alarm.set(alarm);
        self
    }

    pub fn set_time(&self, time: DateTime) {
        self.time.set(time);
    }

    pub fn time(&self) -> DateTime {
        self.time.get()
    }

    pub fn alarm(&self) -> DateTime {
        self.alarm.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn time_reads(&self) -> usize {
        self.time_reads.get()
    }

    pub fn time_writes(&self) -> usize {
        self.time_writes.get()
    }

    pub fn alarm_writes(&self) -> usize {
        self.alarm_writes.get()
    }

    fn check(&self) -> Result<(), MockRtcError> {
        if self.failing.get() {
            Err(MockRtcError)
        } else {
            Ok(())
        }
    }
}

impl Rtc for MockRtc {
    type Error = MockRtcError;

    fn time(&mut self) -> Result<DateTime, Self::Error> {
        self.check()?;
        self.time_reads.set(self.time_reads.get() + 1);
        Ok(self.time.get())
    }

    fn set_time(&mut self, time: &DateTime) -> Result<(), Self::Error> {
        self.check()?;
        self.time_writes.set(self.time_writes.get() + 1);
        self.time.set(*time);
        Ok(())
    }

    fn alarm(&mut self) -> Result<DateTime, Self::Error> {
        self.check()?;
        Ok(self.alarm.get())
    }

    fn set_alarm(&mut self, alarm: &DateTime) -> Result<(), Self::Error> {
        self.check()?;
        self.alarm_writes.set(self.alarm_writes.get() + 1);
        // Only hour, minute and weekday survive, like the real alarm slot.
        self.alarm.set(DateTime {
            hours: alarm.hours,
            minutes: alarm.minutes,
            day: alarm.day,
            ..BLANK_ALARM
        });
        Ok(())
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDisplayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Init,
    ClearWrite { text: String, row: u8, col: u8 },
    SetCursor { row: u8, col: u8 },
}

/// Mock display that records every operation and keeps a model of the glass.
pub struct MockDisplay {
    ops: RefCell<Vec<DisplayOp>>,
    rows: RefCell<[(String, u8); 2]>,
    failing: Cell<bool>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            ops: RefCell::new(Vec::new()),
            rows: RefCell::new([(String::new(), 0), (String::new(), 0)]),
            failing: Cell::new(false),
        }
    }

    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.borrow().clone()
    }

    pub fn op_count(&self) -> usize {
        self.ops.borrow().len()
    }

    pub fn last_op(&self) -> Option<DisplayOp> {
        self.ops.borrow().last().cloned()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Text last written to `row`.
    pub fn text(&self, row: usize) -> String {
        self.rows.borrow()[row].0.clone()
    }

    /// Column the last text on `row` started at.
    pub fn col(&self, row: usize) -> u8 {
        self.rows.borrow()[row].1
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn record(&self, op: DisplayOp) -> Result<(), MockDisplayError> {
        if self.failing.get() {
            return Err(MockDisplayError);
        }
        self.ops.borrow_mut().push(op);
        Ok(())
    }
}

impl CharDisplay for MockDisplay {
    type Error = MockDisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.record(DisplayOp::Init)
    }

    fn clear_write(&mut self, text: &str, row: u8, col: u8) -> Result<(), Self::Error> {
        self.record(DisplayOp::ClearWrite {
            text: text.to_string(),
            row,
            col,
        })?;
        self.rows.borrow_mut()[row as usize] = (text.to_string(), col);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        self.record(DisplayOp::SetCursor { row, col })
    }
}

// ============================================================================
// Mock I²C bus
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError;

impl i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Mock I²C device with a 256-byte register file.
///
/// The first byte of a write sets the register pointer and the rest are
/// stored from there on; reads continue from the pointer. Every write is
/// also recorded verbatim.
pub struct MockI2c {
    pub registers: [u8; 256],
    pointer: usize,
    writes: Vec<(u8, Vec<u8>)>,
    pub failing: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            pointer: 0,
            writes: Vec::new(),
            failing: false,
        }
    }

    pub fn with_registers(start: u8, values: &[u8]) -> Self {
        let mut bus = Self::new();
        for (offset, value) in values.iter().enumerate() {
            bus.registers[start as usize + offset] = *value;
        }
        bus
    }

    /// Every write as (address, bytes).
    pub fn writes(&self) -> &[(u8, Vec<u8>)] {
        &self.writes
    }
}

impl ErrorType for MockI2c {
    type Error = MockI2cError;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.failing {
            return Err(MockI2cError);
        }
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&register, data)) = bytes.split_first() {
                        self.pointer = register as usize;
                        for &byte in data {
                            self.registers[self.pointer % 256] = byte;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer % 256];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and adds up what was requested.
pub struct NoDelay {
    pub total_ns: u64,
}

impl NoDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Wednesday 2025-01-15 14:05:30
pub const WED_AFTERNOON: DateTime = DateTime::new(2025, 1, 15, 4, 14, 5, 30);
