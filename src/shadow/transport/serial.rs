use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::shadow::{
    error::TransportError,
    transport::ShiftOut,
    types::{ChainOrder, SerialConfig},
};

/// Hardware SPI transport.
///
/// The latch (`RCLK`) line doubles as chip-select: it is held low while
/// the bytes are clocked in, and its rising edge commits them to the
/// outputs.
#[derive(Debug)]
pub struct SerialBus<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
    config: SerialConfig,
}

impl<SPI, LATCH> SerialBus<SPI, LATCH> {
    pub fn new(spi: SPI, latch: LATCH) -> Self {
        Self::with_config(spi, latch, SerialConfig::default())
    }

    pub fn with_config(spi: SPI, latch: LATCH, config: SerialConfig) -> Self {
        Self { spi, latch, config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Gives back the bus and the latch pin.
    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }
}

impl<SPI, LATCH> ShiftOut for SerialBus<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    fn shift_out(&mut self, bits: &[u8]) -> Result<(), TransportError> {
        let select = LatchGuard::assert(&mut self.latch)?;

        match self.config.order {
            ChainOrder::AsGiven => self.spi.write(bits).map_err(TransportError::bus)?,
            ChainOrder::Reversed => {
                for byte in bits.iter().rev() {
                    self.spi
                        .write(core::slice::from_ref(byte))
                        .map_err(TransportError::bus)?;
                }
            }
        }
        self.spi.flush().map_err(TransportError::bus)?;

        select.release()
    }
}

/// Holds the latch low for the duration of one transfer.
///
/// Dropping the guard without [`LatchGuard::release`] still drives the
/// latch high, so an early return on a bus error deselects the chain.
struct LatchGuard<'a, L: OutputPin> {
    latch: &'a mut L,
    released: bool,
}

impl<'a, L: OutputPin> LatchGuard<'a, L> {
    fn assert(latch: &'a mut L) -> Result<Self, TransportError> {
        latch.set_low().map_err(TransportError::pin)?;
        Ok(Self {
            latch,
            released: false,
        })
    }

    fn release(mut self) -> Result<(), TransportError> {
        self.released = true;
        self.latch.set_high().map_err(TransportError::pin)
    }
}

impl<L: OutputPin> Drop for LatchGuard<'_, L> {
    fn drop(&mut self) {
        if !self.released {
            // Already unwinding from a bus error; that error wins.
            let _ = self.latch.set_high();
        }
    }
}
