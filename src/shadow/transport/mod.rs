mod bitbang;
mod serial;
mod unused;

pub use bitbang::BitBang;
pub use serial::SerialBus;
pub use unused::Unused;

use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::shadow::error::TransportError;

/// Pushes a full shadow image into the chain and latches it.
///
/// `bits[b]` holds pins `b*8 .. b*8+8`. Implementations block until the
/// outputs are committed or the platform reports a failure.
pub trait ShiftOut {
    fn shift_out(&mut self, bits: &[u8]) -> Result<(), TransportError>;
}

/// Transport chosen by [`GpioShadowBuilder`](crate::shadow::GpioShadowBuilder).
///
/// Resolved once at construction; the variant never changes afterwards.
#[derive(Debug)]
pub enum Transport<SPI, LATCH, CLK, DATA> {
    Serial(SerialBus<SPI, LATCH>),
    Manual(BitBang<LATCH, CLK, DATA>),
}

impl<SPI, LATCH, CLK, DATA> Transport<SPI, LATCH, CLK, DATA> {
    pub fn is_serial(&self) -> bool {
        matches!(self, Transport::Serial(_))
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Transport::Manual(_))
    }
}

impl<SPI, LATCH, CLK, DATA> ShiftOut for Transport<SPI, LATCH, CLK, DATA>
where
    SPI: SpiBus,
    LATCH: OutputPin,
    CLK: OutputPin,
    DATA: OutputPin,
{
    fn shift_out(&mut self, bits: &[u8]) -> Result<(), TransportError> {
        match self {
            Transport::Serial(bus) => bus.shift_out(bits),
            Transport::Manual(pins) => pins.shift_out(bits),
        }
    }
}
