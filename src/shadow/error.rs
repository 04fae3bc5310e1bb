use embedded_hal::{digital, spi};

/// Errors that can occur while building or driving a shift register chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowError {
    /// Construction arguments were invalid. No driver was produced.
    Config(ConfigError),
    /// Pin index is not below `chip_count * 8`.
    PinOutOfRange { pin: u32, pin_count: u32 },
    /// A full shadow write had the wrong number of bytes.
    LengthMismatch { expected: usize, actual: usize },
    /// The 74HC595 is output-only.
    Unsupported(Unsupported),
    /// A write was attempted from inside a `modify` closure.
    Busy,
    /// The bus or one of the manual lines failed mid-transmission.
    ///
    /// The shadow already holds the new value when this is returned, so the
    /// outputs may lag behind it until the next successful transmission.
    Transport(TransportError),
}

/// Reasons a chain could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a serial bus nor manual pins were supplied.
    MissingTransport,
    /// A serial bus and manual clock/data pins were both supplied.
    AmbiguousTransport,
    /// Only part of the latch, clock and data triple was supplied.
    IncompleteManual,
    /// A serial bus was supplied without its latch line.
    MissingLatch,
    /// A chain needs at least one chip.
    ZeroChips,
    /// More chips were requested than the shadow can hold.
    TooManyChips { requested: u32, capacity: usize },
}

/// Input-side features the chip does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    Input,
    Pull,
}

/// Platform failure during a transmission, reduced to its portable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    Bus(spi::ErrorKind),
    Pin(digital::ErrorKind),
}

impl TransportError {
    pub(crate) fn bus<E: spi::Error>(err: E) -> Self {
        TransportError::Bus(err.kind())
    }

    pub(crate) fn pin<E: digital::Error>(err: E) -> Self {
        TransportError::Pin(err.kind())
    }
}

impl From<ConfigError> for ShadowError {
    fn from(err: ConfigError) -> Self {
        ShadowError::Config(err)
    }
}

impl From<Unsupported> for ShadowError {
    fn from(err: Unsupported) -> Self {
        ShadowError::Unsupported(err)
    }
}

impl From<TransportError> for ShadowError {
    fn from(err: TransportError) -> Self {
        ShadowError::Transport(err)
    }
}

impl core::fmt::Display for ShadowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShadowError::Config(err) => write!(f, "invalid configuration: {err}"),
            ShadowError::PinOutOfRange { pin, pin_count } => {
                write!(f, "pin {pin} out of range for a chain of {pin_count} pins")
            }
            ShadowError::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} shadow bytes, got {actual}")
            }
            ShadowError::Unsupported(err) => write!(f, "{err}"),
            ShadowError::Busy => write!(f, "shadow is already being modified"),
            ShadowError::Transport(err) => write!(f, "transmission failed: {err}"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingTransport => write!(f, "no serial bus or manual pins supplied"),
            ConfigError::AmbiguousTransport => {
                write!(f, "both a serial bus and manual pins supplied")
            }
            ConfigError::IncompleteManual => {
                write!(f, "manual mode needs latch, clock and data pins")
            }
            ConfigError::MissingLatch => write!(f, "serial bus supplied without a latch pin"),
            ConfigError::ZeroChips => write!(f, "chip count must be at least 1"),
            ConfigError::TooManyChips {
                requested,
                capacity,
            } => write!(f, "{requested} chips requested, capacity is {capacity}"),
        }
    }
}

impl core::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Unsupported::Input => write!(f, "digital input not supported"),
            Unsupported::Pull => write!(f, "pull-up and pull-down not supported"),
        }
    }
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Bus(kind) => write!(f, "serial bus: {kind}"),
            TransportError::Pin(kind) => write!(f, "output pin: {kind}"),
        }
    }
}

impl core::error::Error for ShadowError {}

impl digital::Error for ShadowError {
    fn kind(&self) -> digital::ErrorKind {
        match self {
            ShadowError::Transport(TransportError::Pin(kind)) => *kind,
            _ => digital::ErrorKind::Other,
        }
    }
}
