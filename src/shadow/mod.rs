pub mod builder;
pub mod error;
pub mod helpers;
pub mod pin;
pub mod storage;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::GpioShadowBuilder;
pub use error::{ConfigError, ShadowError, TransportError, Unsupported};
pub use pin::PinHandle;
pub use storage::{DEFAULT_CAPACITY, GpioShadow};
pub use transport::{BitBang, SerialBus, ShiftOut, Transport, Unused};
pub use types::{ChainOrder, DEFAULT_BAUDRATE_HZ, Direction, Pull, SerialConfig};

pub mod prelude {
    pub use super::{
        BitBang, ChainOrder, ConfigError, Direction, GpioShadow, GpioShadowBuilder, PinHandle,
        Pull, SerialBus, SerialConfig, ShadowError, ShiftOut, Transport, TransportError,
        Unsupported,
    };
}
