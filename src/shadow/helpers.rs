//! Bit addressing into the shadow bytes.
//!
//! Pin `n` lives in byte `n / 8` at bit `n % 8`; bit 0 is the chip's `QA`
//! output and bit 7 its `QH` output.

use crate::shadow::ShadowError;

/// Number of addressable pins on a chain of `chip_count` chips.
pub fn pin_count(chip_count: u32) -> u32 {
    chip_count.saturating_mul(8)
}

/// Locates a pin in the shadow bytes.
///
/// Returns `(byte_index, mask)` for `pin`, or an error if the pin is not
/// below `pin_count`.
///
/// # Errors
/// * [`ShadowError::PinOutOfRange`] - if `pin >= pin_count`
///
/// # Example
/// ```
/// use embedded_74hc595::shadow::helpers::pin_span;
///
/// // Two chips, 16 pins. Pin 11 is bit 3 of the second byte.
/// assert_eq!(pin_span(11, 16), Ok((1, 0b0000_1000)));
///
/// // Pin 16 does not exist on a two-chip chain.
/// assert!(pin_span(16, 16).is_err());
/// ```
pub fn pin_span(pin: u32, pin_count: u32) -> Result<(usize, u8), ShadowError> {
    if pin >= pin_count {
        return Err(ShadowError::PinOutOfRange { pin, pin_count });
    }

    Ok(((pin / 8) as usize, 1 << (pin % 8)))
}

/// Reads the bit addressed by a span from [`pin_span`].
#[inline]
pub fn read_bit(bits: &[u8], (byte, mask): (usize, u8)) -> bool {
    bits[byte] & mask != 0
}

/// Sets or clears the bit addressed by a span from [`pin_span`].
#[inline]
pub fn write_bit(bits: &mut [u8], (byte, mask): (usize, u8), value: bool) {
    if value {
        bits[byte] |= mask;
    } else {
        bits[byte] &= !mask;
    }
}

#[test]
fn pin_span_edge_cases() {
    // First and last pin of a single chip
    assert_eq!(pin_span(0, 8), Ok((0, 0b0000_0001)));
    assert_eq!(pin_span(7, 8), Ok((0, 0b1000_0000)));

    // First pin of the second chip
    assert_eq!(pin_span(8, 16), Ok((1, 0b0000_0001)));

    // One past the end
    assert_eq!(
        pin_span(8, 8),
        Err(ShadowError::PinOutOfRange {
            pin: 8,
            pin_count: 8
        })
    );

    // Far out of range
    assert!(pin_span(u32::MAX, 16).is_err());
}

#[test]
fn write_bit_touches_only_its_bit() {
    let mut bits = [0b1010_1010, 0x00];

    write_bit(&mut bits, (0, 0b0000_0001), true);
    assert_eq!(bits, [0b1010_1011, 0x00]);

    write_bit(&mut bits, (0, 0b1000_0000), false);
    assert_eq!(bits, [0b0010_1011, 0x00]);

    write_bit(&mut bits, (1, 0b0001_0000), true);
    assert_eq!(bits, [0b0010_1011, 0b0001_0000]);
    assert!(read_bit(&bits, (1, 0b0001_0000)));
    assert!(!read_bit(&bits, (1, 0b0010_0000)));
}
