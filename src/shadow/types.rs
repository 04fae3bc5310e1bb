/// Default SPI clock for a 74HC595 chain.
pub const DEFAULT_BAUDRATE_HZ: u32 = 1_000_000;

/// Pin direction. A shift register output can only ever be `Output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Pull resistor mode. The chip has none; `None` is the only accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
}

/// Order in which the serial path puts shadow bytes on the wire.
///
/// The first byte on the wire is pushed farthest down the chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChainOrder {
    /// Bytes go out as stored: byte 0 ends up in the last chip.
    #[default]
    AsGiven,
    /// Last byte first: byte 0 ends up in the chip wired to the MCU,
    /// matching the bit-banged path.
    Reversed,
}

/// Serial bus settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Clock rate the platform should program into its SPI peripheral.
    ///
    /// The bus trait has no rate setter, so the driver only carries it.
    pub baudrate_hz: u32,
    pub order: ChainOrder,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate_hz: DEFAULT_BAUDRATE_HZ,
            order: ChainOrder::default(),
        }
    }
}
