use embedded_hal::digital::{OutputPin, PinState};

use crate::shadow::{error::TransportError, transport::ShiftOut};

/// Software transport over three output pins.
///
/// Bytes are shifted last byte first, each MSB first. For every bit the
/// clock is pulled low, the data line is set, and only then does the clock
/// rise, so `SER` is stable before the `SRCLK` rising edge. The latch stays
/// low for the whole chain and rises once after the final bit.
#[derive(Debug)]
pub struct BitBang<LATCH, CLK, DATA> {
    latch: LATCH,
    clock: CLK,
    data: DATA,
}

impl<LATCH, CLK, DATA> BitBang<LATCH, CLK, DATA> {
    pub fn new(latch: LATCH, clock: CLK, data: DATA) -> Self {
        Self { latch, clock, data }
    }

    /// Gives back the latch, clock and data pins.
    pub fn release(self) -> (LATCH, CLK, DATA) {
        (self.latch, self.clock, self.data)
    }
}

impl<LATCH, CLK, DATA> BitBang<LATCH, CLK, DATA>
where
    CLK: OutputPin,
    DATA: OutputPin,
{
    fn shift_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        for bit in (0..8).rev() {
            self.clock.set_low().map_err(TransportError::pin)?;
            self.data
                .set_state(PinState::from(byte & (1 << bit) != 0))
                .map_err(TransportError::pin)?;
            self.clock.set_high().map_err(TransportError::pin)?;
        }
        Ok(())
    }
}

impl<LATCH, CLK, DATA> ShiftOut for BitBang<LATCH, CLK, DATA>
where
    LATCH: OutputPin,
    CLK: OutputPin,
    DATA: OutputPin,
{
    fn shift_out(&mut self, bits: &[u8]) -> Result<(), TransportError> {
        self.latch.set_low().map_err(TransportError::pin)?;
        for &byte in bits.iter().rev() {
            self.shift_byte(byte)?;
        }
        self.latch.set_high().map_err(TransportError::pin)
    }
}
