use core::convert::Infallible;

use embedded_hal::{digital, spi};

/// Placeholder for a builder slot that was never filled.
///
/// It has no values, so a `Transport` holding it in a slot can never take
/// the variant that would need it.
#[derive(Debug)]
pub enum Unused {}

impl digital::ErrorType for Unused {
    type Error = Infallible;
}

impl digital::OutputPin for Unused {
    fn set_low(&mut self) -> Result<(), Infallible> {
        match *self {}
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        match *self {}
    }
}

impl spi::ErrorType for Unused {
    type Error = Infallible;
}

impl spi::SpiBus for Unused {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        match *self {}
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Infallible> {
        match *self {}
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
        match *self {}
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        match *self {}
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        match *self {}
    }
}
