use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::shadow::{
    ShadowError,
    error::ConfigError,
    helpers::{pin_count, pin_span, read_bit},
    pin::PinHandle,
    transport::ShiftOut,
};

/// Chain capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 8;

struct Chain<T, const CAP: usize> {
    bits: Vec<u8, CAP>,
    transport: T,
    /// Set while a `modify` closure runs.
    editing: bool,
}

/// Shadow register for a chain of 74HC595 chips.
///
/// Holds the last value sent to the outputs and the transport that sends it.
/// Every change is transmitted in full before the call returns.
///
/// # Const Generics
/// - `CAP`: Maximum number of chips; the actual count is chosen at
///   construction and never changes.
///
/// # Type Parameters
/// - `T`: Transport that shifts the bytes out and latches them
///
/// All access goes through a critical section, so a shared `&GpioShadow`
/// can be handed to several contexts and their transmissions will not
/// interleave.
pub struct GpioShadow<T, const CAP: usize = DEFAULT_CAPACITY> {
    chip_count: u32,
    chain: Mutex<RefCell<Chain<T, CAP>>>,
}

impl<T, const CAP: usize> core::fmt::Debug for GpioShadow<T, CAP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GpioShadow")
            .field("chip_count", &self.chip_count)
            .finish_non_exhaustive()
    }
}

impl<T, const CAP: usize> GpioShadow<T, CAP> {
    /// Creates a chain of `chip_count` chips with every output low.
    ///
    /// Nothing is transmitted; the outputs keep whatever the chips powered up
    /// with until the first write.
    pub fn new(transport: T, chip_count: u32) -> Result<Self, ShadowError> {
        if chip_count == 0 {
            return Err(ConfigError::ZeroChips.into());
        }

        let too_many = ConfigError::TooManyChips {
            requested: chip_count,
            capacity: CAP,
        };
        if chip_count as usize > CAP {
            return Err(too_many.into());
        }

        let mut bits = Vec::new();
        bits.resize(chip_count as usize, 0)
            .map_err(|_| ShadowError::from(too_many))?;

        log::debug!("74HC595 chain ready: {} chip(s)", chip_count);

        Ok(Self {
            chip_count,
            chain: Mutex::new(RefCell::new(Chain {
                bits,
                transport,
                editing: false,
            })),
        })
    }

    pub fn chip_count(&self) -> u32 {
        self.chip_count
    }

    pub fn pin_count(&self) -> u32 {
        pin_count(self.chip_count)
    }

    /// Returns a copy of the shadow bytes. No hardware access.
    pub fn read(&self) -> Vec<u8, CAP> {
        critical_section::with(|cs| self.chain.borrow(cs).borrow().bits.clone())
    }

    /// Returns a handle to one output pin.
    ///
    /// # Errors
    /// * [`ShadowError::PinOutOfRange`] - if `pin >= chip_count * 8`
    pub fn get_pin(&self, pin: u32) -> Result<PinHandle<'_, T, CAP>, ShadowError> {
        let span = pin_span(pin, self.pin_count())?;
        Ok(PinHandle::new(self, pin, span))
    }

    /// Iterates over a handle for every pin of the chain, in pin order.
    pub fn pins(&self) -> impl Iterator<Item = PinHandle<'_, T, CAP>> + '_ {
        let count = self.pin_count();
        (0..count).filter_map(move |pin| self.get_pin(pin).ok())
    }

    /// Consumes the shadow and gives back the transport.
    pub fn release(self) -> T {
        self.chain.into_inner().into_inner().transport
    }

    pub(crate) fn bit(&self, span: (usize, u8)) -> bool {
        critical_section::with(|cs| read_bit(&self.chain.borrow(cs).borrow().bits, span))
    }
}

impl<T, const CAP: usize> GpioShadow<T, CAP>
where
    T: ShiftOut,
{
    /// Replaces the whole shadow and transmits it.
    ///
    /// # Errors
    /// * [`ShadowError::LengthMismatch`] - if `bits.len() != chip_count`;
    ///   nothing is changed or sent
    /// * [`ShadowError::Transport`] - if transmission fails; the shadow
    ///   already holds `bits`
    pub fn write(&self, bits: &[u8]) -> Result<(), ShadowError> {
        let expected = self.chip_count as usize;
        if bits.len() != expected {
            return Err(ShadowError::LengthMismatch {
                expected,
                actual: bits.len(),
            });
        }

        self.modify(|shadow| shadow.copy_from_slice(bits))
    }

    /// Edits the shadow, then transmits it once.
    ///
    /// Use this to change several pins with a single transfer instead of
    /// one transfer per pin.
    ///
    /// The closure works on a copy of the shadow. Reads from inside it see
    /// the previous value; writes from inside it fail with
    /// [`ShadowError::Busy`] and change nothing.
    pub fn modify<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, ShadowError> {
        let (out, bits, sent) = critical_section::with(|cs| {
            let cell = self.chain.borrow(cs);

            let mut bits = {
                let mut chain = cell.borrow_mut();
                if chain.editing {
                    return Err(ShadowError::Busy);
                }
                chain.editing = true;
                chain.bits.clone()
            };

            let out = f(&mut bits);

            let mut chain = cell.borrow_mut();
            chain.editing = false;
            chain.bits.clone_from(&bits);
            let sent = chain.transport.shift_out(&bits);
            Ok((out, bits, sent))
        })?;

        match sent {
            Ok(()) => {
                log::trace!("shifted out {:02x?}", bits.as_slice());
                Ok(out)
            }
            Err(err) => {
                log::warn!("74HC595 transmission failed, outputs lag the shadow: {}", err);
                Err(err.into())
            }
        }
    }

    /// Drives every output low.
    pub fn clear(&self) -> Result<(), ShadowError> {
        self.modify(|bits| bits.fill(0))
    }

    /// Transmits the current shadow again without changing it.
    ///
    /// Brings the outputs back in line after a [`ShadowError::Transport`].
    pub fn resend(&self) -> Result<(), ShadowError> {
        self.modify(|_| ())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::{
        error::TransportError,
        test_support::{ScriptedTransport, manual_shadow, serial_shadow},
        types::ChainOrder,
    };
    use std::vec;

    #[test]
    fn new_chain_is_all_low_and_silent() {
        let (shadow, log) = manual_shadow(3);

        assert_eq!(shadow.read().as_slice(), &[0, 0, 0]);
        assert_eq!(shadow.chip_count(), 3);
        assert_eq!(shadow.pin_count(), 24);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn zero_chips_is_a_config_error() {
        let result = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 0);
        assert_eq!(result.unwrap_err(), ShadowError::Config(ConfigError::ZeroChips));
    }

    #[test]
    fn more_chips_than_capacity_is_a_config_error() {
        let result = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 5);
        assert_eq!(
            result.unwrap_err(),
            ShadowError::Config(ConfigError::TooManyChips {
                requested: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn write_then_read_returns_the_same_bytes() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 3).unwrap();

        shadow.write(&[0x01, 0x80, 0xFE]).unwrap();

        assert_eq!(shadow.read().as_slice(), &[0x01, 0x80, 0xFE]);
        assert_eq!(
            shadow.release().sent,
            vec![vec![0x01, 0x80, 0xFE]]
        );
    }

    #[test]
    fn wrong_length_write_changes_nothing() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 2).unwrap();
        shadow.write(&[0x11, 0x22]).unwrap();

        assert_eq!(
            shadow.write(&[0xFF]),
            Err(ShadowError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(shadow.read().as_slice(), &[0x11, 0x22]);
        assert_eq!(shadow.release().sent.len(), 1);
    }

    #[test]
    fn failed_transmission_still_updates_the_shadow() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::failing_once(), 1).unwrap();

        let result = shadow.write(&[0x42]);

        assert!(matches!(
            result,
            Err(ShadowError::Transport(TransportError::Bus(_)))
        ));
        assert_eq!(shadow.read().as_slice(), &[0x42]);

        // Resend brings the outputs back in line
        shadow.resend().unwrap();
        assert_eq!(shadow.release().sent, vec![vec![0x42]]);
    }

    #[test]
    fn modify_transmits_once_for_many_pins() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 2).unwrap();

        let touched = shadow
            .modify(|bits| {
                bits[0] = 0x0F;
                bits[1] = 0xF0;
                2
            })
            .unwrap();

        assert_eq!(touched, 2);
        assert_eq!(shadow.release().sent, vec![vec![0x0F, 0xF0]]);
    }

    #[test]
    fn reads_inside_modify_see_the_previous_shadow() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 1).unwrap();
        shadow.write(&[0x01]).unwrap();

        let seen = shadow
            .modify(|bits| {
                bits[0] = 0xFE;
                (shadow.read()[0], shadow.get_pin(0).unwrap().value())
            })
            .unwrap();

        assert_eq!(seen, (0x01, true));
        assert_eq!(shadow.read().as_slice(), &[0xFE]);
    }

    #[test]
    fn writes_inside_modify_are_refused() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 1).unwrap();

        let nested = shadow
            .modify(|_| shadow.get_pin(3).unwrap().set_value(true))
            .unwrap();

        assert_eq!(nested, Err(ShadowError::Busy));
        assert_eq!(shadow.read().as_slice(), &[0x00]);

        // The chain is usable again once the outer edit returns
        shadow.get_pin(3).unwrap().set_value(true).unwrap();
        assert_eq!(shadow.release().sent, vec![vec![0x00], vec![0x08]]);
    }

    #[test]
    fn clear_drives_everything_low() {
        let shadow = GpioShadow::<_, 4>::new(ScriptedTransport::default(), 2).unwrap();
        shadow.write(&[0xFF, 0xFF]).unwrap();

        shadow.clear().unwrap();

        assert_eq!(shadow.read().as_slice(), &[0, 0]);
        assert_eq!(
            shadow.release().sent,
            vec![vec![0xFF, 0xFF], vec![0x00, 0x00]]
        );
    }

    #[test]
    fn pins_covers_the_whole_chain() {
        let (shadow, _log) = manual_shadow(2);

        let pins: std::vec::Vec<u32> = shadow.pins().map(|p| p.pin()).collect();

        assert_eq!(pins, (0..16).collect::<std::vec::Vec<_>>());
    }

    #[test]
    fn both_transports_keep_the_same_shadow() {
        let (serial, serial_log) = serial_shadow(2, ChainOrder::AsGiven);
        let (manual, manual_log) = manual_shadow(2);

        serial.write(&[0xA5, 0x3C]).unwrap();
        manual.write(&[0xA5, 0x3C]).unwrap();

        assert!(!serial_log.borrow().is_empty());
        assert!(!manual_log.borrow().is_empty());
        assert_eq!(serial.read(), manual.read());
    }
}
