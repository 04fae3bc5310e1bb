//! Blink example: two chained 74HC595s driven by three bit-banged pins
//!
//! This example demonstrates:
//! - Building a chain from latch, clock and data pins
//! - Toggling a single output through a pin handle
//! - Changing several outputs with one transfer
//! - Rejected pins and input requests
//!
//! The "pins" print to the console so it runs on a host.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_74hc595::prelude::*;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Counts clock edges and reports the count on each latch.
struct ConsolePin {
    name: &'static str,
    shifted: Rc<Cell<u32>>,
}

impl ErrorType for ConsolePin {
    type Error = Infallible;
}

impl OutputPin for ConsolePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.name == "latch" {
            self.shifted.set(0);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        match self.name {
            "latch" => println!("  latched after {} clock edges", self.shifted.get()),
            "clock" => self.shifted.set(self.shifted.get() + 1),
            _ => {}
        }
        Ok(())
    }
}

fn main() -> Result<(), ShadowError> {
    println!("=== 74HC595 Blink Example ===\n");

    let shifted = Rc::new(Cell::new(0));
    let pin = |name: &'static str| ConsolePin {
        name,
        shifted: Rc::clone(&shifted),
    };

    let shadow = GpioShadowBuilder::new()
        .latch(pin("latch"))
        .clock(pin("clock"))
        .data(pin("data"))
        .chip_count(2)
        .build()?;

    println!(
        "Chain: {} chips, {} pins\n",
        shadow.chip_count(),
        shadow.pin_count()
    );

    // 1. Blink pin 1 a few times
    let led = shadow.get_pin(1)?;
    for cycle in 0..3 {
        println!("Cycle {cycle}: pin 1 high");
        led.set_value(true)?;
        println!("Cycle {cycle}: pin 1 low");
        led.set_value(false)?;
    }

    // 2. Light every other output on both chips with one transfer
    println!("\nPattern 0xAA 0x55:");
    shadow.write(&[0xAA, 0x55])?;
    println!("  shadow = {:02X?}", shadow.read().as_slice());

    // 3. Read back individual pins from the shadow
    for handle in shadow.pins().take(4) {
        println!("  pin {} = {}", handle.pin(), handle.value());
    }

    // 4. Pins past the chain are rejected
    match shadow.get_pin(16) {
        Err(err) => println!("\nget_pin(16): {err}"),
        Ok(_) => unreachable!("a two-chip chain has 16 pins"),
    }

    // 5. The chip has no inputs
    if let Err(err) = led.switch_to_input(None) {
        println!("switch_to_input: {err}");
    }

    shadow.clear()?;
    println!("\nAll outputs cleared");

    Ok(())
}
