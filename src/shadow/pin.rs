use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::shadow::{
    ShadowError,
    error::Unsupported,
    helpers::write_bit,
    storage::GpioShadow,
    transport::ShiftOut,
    types::{Direction, Pull},
};

/// One output of the chain.
///
/// A handle borrows its [`GpioShadow`] and holds nothing but the pin
/// position, so it is cheap to create and copy. Every write is a full
/// read-modify-write of the shadow followed by a full chain transmission;
/// use [`GpioShadow::modify`] to change many pins with one transfer.
pub struct PinHandle<'a, T, const CAP: usize> {
    shadow: &'a GpioShadow<T, CAP>,
    pin: u32,
    span: (usize, u8),
}

impl<T, const CAP: usize> Clone for PinHandle<'_, T, CAP> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const CAP: usize> Copy for PinHandle<'_, T, CAP> {}

impl<T, const CAP: usize> core::fmt::Debug for PinHandle<'_, T, CAP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PinHandle").field("pin", &self.pin).finish()
    }
}

impl<'a, T, const CAP: usize> PinHandle<'a, T, CAP> {
    pub(crate) fn new(shadow: &'a GpioShadow<T, CAP>, pin: u32, span: (usize, u8)) -> Self {
        Self { shadow, pin, span }
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    /// Level last written to this pin. Reads the shadow, not the hardware.
    pub fn value(&self) -> bool {
        self.shadow.bit(self.span)
    }

    pub fn direction(&self) -> Direction {
        Direction::Output
    }

    /// Accepts only [`Direction::Output`].
    pub fn set_direction(&self, direction: Direction) -> Result<(), ShadowError> {
        match direction {
            Direction::Output => Ok(()),
            Direction::Input => Err(Unsupported::Input.into()),
        }
    }

    pub fn pull(&self) -> Option<Pull> {
        None
    }

    /// Accepts only `None`.
    pub fn set_pull(&self, pull: Option<Pull>) -> Result<(), ShadowError> {
        match pull {
            None => Ok(()),
            Some(_) => Err(Unsupported::Pull.into()),
        }
    }

    /// Always fails: the 74HC595 has no inputs.
    pub fn switch_to_input(&self, _pull: Option<Pull>) -> Result<(), ShadowError> {
        Err(Unsupported::Input.into())
    }
}

impl<T, const CAP: usize> PinHandle<'_, T, CAP>
where
    T: ShiftOut,
{
    /// Sets the pin and transmits the whole chain.
    pub fn set_value(&self, value: bool) -> Result<(), ShadowError> {
        let span = self.span;
        self.shadow.modify(|bits| write_bit(bits, span, value))
    }

    pub fn switch_to_output(&self, initial_value: bool) -> Result<(), ShadowError> {
        self.set_direction(Direction::Output)?;
        self.set_value(initial_value)
    }
}

impl<T, const CAP: usize> ErrorType for PinHandle<'_, T, CAP> {
    type Error = ShadowError;
}

impl<T: ShiftOut, const CAP: usize> OutputPin for PinHandle<'_, T, CAP> {
    fn set_low(&mut self) -> Result<(), ShadowError> {
        self.set_value(false)
    }

    fn set_high(&mut self) -> Result<(), ShadowError> {
        self.set_value(true)
    }
}

impl<T: ShiftOut, const CAP: usize> StatefulOutputPin for PinHandle<'_, T, CAP> {
    fn is_set_high(&mut self) -> Result<bool, ShadowError> {
        Ok(self.value())
    }

    fn is_set_low(&mut self) -> Result<bool, ShadowError> {
        Ok(!self.value())
    }
}
