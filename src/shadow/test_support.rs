//! Test support utilities - only compiled in test builds.

use std::{cell::RefCell, rc::Rc, vec::Vec};

use embedded_hal::{digital, spi};

use crate::shadow::{
    error::TransportError,
    storage::GpioShadow,
    transport::{BitBang, SerialBus, ShiftOut},
    types::{ChainOrder, SerialConfig},
};

/// Transports over the recording fakes. Test chains hold up to 4 chips.
pub type TestBitBang = BitBang<RecordingPin, RecordingPin, RecordingPin>;
pub type TestSerial = SerialBus<FakeSpi, RecordingPin>;

/// Everything the fakes saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Latch(bool),
    Clock(bool),
    Data(bool),
    Spi(Vec<u8>),
    Flush,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl spi::Error for FakeError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Latch,
    Clock,
    Data,
}

/// Output pin that appends every level change to a shared log.
///
/// A failing pin returns an error and records nothing.
pub struct RecordingPin {
    log: EventLog,
    role: Role,
    fail: bool,
}

impl RecordingPin {
    fn new(log: &EventLog, role: Role) -> Self {
        Self {
            log: Rc::clone(log),
            role,
            fail: false,
        }
    }

    pub fn latch(log: &EventLog) -> Self {
        Self::new(log, Role::Latch)
    }

    pub fn clock(log: &EventLog) -> Self {
        Self::new(log, Role::Clock)
    }

    pub fn data(log: &EventLog) -> Self {
        Self::new(log, Role::Data)
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn record(&mut self, high: bool) -> Result<(), FakeError> {
        if self.fail {
            return Err(FakeError);
        }
        let event = match self.role {
            Role::Latch => Event::Latch(high),
            Role::Clock => Event::Clock(high),
            Role::Data => Event::Data(high),
        };
        self.log.borrow_mut().push(event);
        Ok(())
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = FakeError;
}

impl digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), FakeError> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), FakeError> {
        self.record(true)
    }
}

/// SPI bus that logs writes and flushes.
///
/// A failing write or flush returns an error and records nothing.
pub struct FakeSpi {
    log: EventLog,
    writes_left: Option<usize>,
    fail_flush: bool,
}

impl FakeSpi {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
            writes_left: None,
            fail_flush: false,
        }
    }

    /// Fails on the first write.
    pub fn failing(log: &EventLog) -> Self {
        Self::failing_after(log, 0)
    }

    /// Accepts `writes` writes, then fails every one after.
    pub fn failing_after(log: &EventLog, writes: usize) -> Self {
        Self {
            writes_left: Some(writes),
            ..Self::new(log)
        }
    }

    pub fn failing_flush(log: &EventLog) -> Self {
        Self {
            fail_flush: true,
            ..Self::new(log)
        }
    }
}

impl spi::ErrorType for FakeSpi {
    type Error = FakeError;
}

impl spi::SpiBus for FakeSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), FakeError> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), FakeError> {
        match self.writes_left {
            Some(0) => return Err(FakeError),
            Some(ref mut left) => *left -= 1,
            None => {}
        }
        self.log.borrow_mut().push(Event::Spi(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), FakeError> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), FakeError> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), FakeError> {
        if self.fail_flush {
            return Err(FakeError);
        }
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

/// Transport that keeps every successfully sent image.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub sent: Vec<Vec<u8>>,
    failures: usize,
}

impl ScriptedTransport {
    pub fn failing_once() -> Self {
        Self {
            sent: Vec::new(),
            failures: 1,
        }
    }
}

impl ShiftOut for ScriptedTransport {
    fn shift_out(&mut self, bits: &[u8]) -> Result<(), TransportError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(TransportError::Bus(spi::ErrorKind::Other));
        }
        self.sent.push(bits.to_vec());
        Ok(())
    }
}

/// Data line level at each rising clock edge.
pub fn clocked_bits(events: &[Event]) -> Vec<bool> {
    let mut data = false;
    let mut bits = Vec::new();
    for event in events {
        match event {
            Event::Data(level) => data = *level,
            Event::Clock(true) => bits.push(data),
            _ => {}
        }
    }
    bits
}

/// Latch level at each rising clock edge. The latch idles high.
pub fn latch_levels_at_edges(events: &[Event]) -> Vec<bool> {
    let mut latch = true;
    let mut levels = Vec::new();
    for event in events {
        match event {
            Event::Latch(level) => latch = *level,
            Event::Clock(true) => levels.push(latch),
            _ => {}
        }
    }
    levels
}

/// Helper to create a bit-banged chain over recording pins
pub fn manual_shadow(chip_count: u32) -> (GpioShadow<TestBitBang, 4>, EventLog) {
    let log = event_log();
    let pins = BitBang::new(
        RecordingPin::latch(&log),
        RecordingPin::clock(&log),
        RecordingPin::data(&log),
    );
    (GpioShadow::new(pins, chip_count).unwrap(), log)
}

/// Helper to create a serial chain over a recording bus
pub fn serial_shadow(chip_count: u32, order: ChainOrder) -> (GpioShadow<TestSerial, 4>, EventLog) {
    let log = event_log();
    let bus = SerialBus::with_config(
        FakeSpi::new(&log),
        RecordingPin::latch(&log),
        SerialConfig {
            order,
            ..SerialConfig::default()
        },
    );
    (GpioShadow::new(bus, chip_count).unwrap(), log)
}
