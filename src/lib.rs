//! A `no_std`, no-alloc driver for chains of 74HC595 shift registers.
//!
//! The chips are write-only, so the driver keeps a shadow register: an
//! in-memory copy of every output. Each pin is exposed as an
//! [`embedded_hal::digital::OutputPin`] that edits one bit of the shadow and
//! retransmits the whole chain.
//!
//! # Features
//!
//! - **Zero heap allocation** - Shadow bytes live in a fixed-capacity buffer
//! - **Two transports** - Hardware SPI with the latch as chip-select, or
//!   bit-banged latch/clock/data pins
//! - **Pin handles** - Cheap borrowed views usable wherever an output pin is
//! - **Critical sections** - Shared access from several contexts never
//!   interleaves two transfers
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐         ┌────────────────────┐         ┌─────────────┐
//! │  PinHandle       │  r/m/w  │  GpioShadow        │ shift   │  74HC595    │
//! │  set_value()     │────────▶│  bits: [chip; N]   │────────▶│  chain      │
//! │  value()         │◀────────│  transport         │  latch  │             │
//! └──────────────────┘  shadow └────────────────────┘         └─────────────┘
//! ```
//!
//! - Pin `n` is bit `n % 8` of shadow byte `n / 8`
//! - **Writes** update the shadow, then shift the full chain out and latch it
//!   before returning
//! - **Reads** come from the shadow; the hardware is never queried
//! - A failed transmission leaves the new value in the shadow; call
//!   [`GpioShadow::resend`](shadow::GpioShadow::resend) to bring the outputs
//!   back in line
//!
//! # Example
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # struct Pin;
//! # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let (latch_pin, clock_pin, data_pin) = (Pin, Pin, Pin);
//! use embedded_74hc595::prelude::*;
//!
//! // Two chips driven from three GPIOs
//! let shadow = GpioShadowBuilder::new()
//!     .latch(latch_pin)
//!     .clock(clock_pin)
//!     .data(data_pin)
//!     .chip_count(2)
//!     .build()?;
//!
//! // Second chip, output QB
//! let led = shadow.get_pin(9)?;
//! led.set_value(true)?;
//! assert!(led.value());
//!
//! // Several pins, one transfer
//! shadow.modify(|bits| bits[0] = 0b1010_1010)?;
//! # Ok::<(), ShadowError>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod shadow;

pub mod prelude {
    pub use crate::shadow::prelude::*;
}
