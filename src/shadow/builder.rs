use crate::shadow::{
    ShadowError,
    error::ConfigError,
    storage::{DEFAULT_CAPACITY, GpioShadow},
    transport::{BitBang, SerialBus, Transport, Unused},
    types::SerialConfig,
};

/// Collects the optional construction parameters and resolves them into
/// one transport.
///
/// Supply either a serial bus with its latch line, or the latch, clock and
/// data pins for bit-banging. Each setter may change the builder's type;
/// unfilled slots stay [`Unused`].
///
/// | supplied                       | result                     |
/// |--------------------------------|----------------------------|
/// | `spi` + `latch`                | [`Transport::Serial`]      |
/// | `latch` + `clock` + `data`     | [`Transport::Manual`]      |
/// | nothing                        | `MissingTransport`         |
/// | `spi` + `clock` or `data`      | `AmbiguousTransport`       |
/// | `spi` alone                    | `MissingLatch`             |
/// | part of the manual triple      | `IncompleteManual`         |
pub struct GpioShadowBuilder<SPI, LATCH, CLK, DATA> {
    spi: Option<SPI>,
    latch: Option<LATCH>,
    clock: Option<CLK>,
    data: Option<DATA>,
    chip_count: u32,
    config: SerialConfig,
}

// Start the builder
impl GpioShadowBuilder<Unused, Unused, Unused, Unused> {
    pub fn new() -> Self {
        GpioShadowBuilder {
            spi: None,
            latch: None,
            clock: None,
            data: None,
            chip_count: 1,
            config: SerialConfig::default(),
        }
    }
}

impl Default for GpioShadowBuilder<Unused, Unused, Unused, Unused> {
    fn default() -> Self {
        Self::new()
    }
}

impl<SPI, LATCH, CLK, DATA> GpioShadowBuilder<SPI, LATCH, CLK, DATA> {
    pub fn spi<S>(self, spi: S) -> GpioShadowBuilder<S, LATCH, CLK, DATA> {
        GpioShadowBuilder {
            spi: Some(spi),
            latch: self.latch,
            clock: self.clock,
            data: self.data,
            chip_count: self.chip_count,
            config: self.config,
        }
    }

    /// Latch (`RCLK`) pin. On the serial path it is also the chip-select.
    pub fn latch<L>(self, latch: L) -> GpioShadowBuilder<SPI, L, CLK, DATA> {
        GpioShadowBuilder {
            spi: self.spi,
            latch: Some(latch),
            clock: self.clock,
            data: self.data,
            chip_count: self.chip_count,
            config: self.config,
        }
    }

    pub fn clock<C>(self, clock: C) -> GpioShadowBuilder<SPI, LATCH, C, DATA> {
        GpioShadowBuilder {
            spi: self.spi,
            latch: self.latch,
            clock: Some(clock),
            data: self.data,
            chip_count: self.chip_count,
            config: self.config,
        }
    }

    pub fn data<D>(self, data: D) -> GpioShadowBuilder<SPI, LATCH, CLK, D> {
        GpioShadowBuilder {
            spi: self.spi,
            latch: self.latch,
            clock: self.clock,
            data: Some(data),
            chip_count: self.chip_count,
            config: self.config,
        }
    }

    /// Number of chained chips. Defaults to 1.
    pub fn chip_count(mut self, chip_count: u32) -> Self {
        self.chip_count = chip_count;
        self
    }

    /// Serial bus settings. Ignored on the manual path.
    pub fn serial_config(mut self, config: SerialConfig) -> Self {
        self.config = config;
        self
    }

    pub fn baudrate(mut self, baudrate_hz: u32) -> Self {
        self.config.baudrate_hz = baudrate_hz;
        self
    }

    /// Build with the default chain capacity.
    pub fn build(
        self,
    ) -> Result<GpioShadow<Transport<SPI, LATCH, CLK, DATA>, DEFAULT_CAPACITY>, ShadowError> {
        self.build_with_capacity::<DEFAULT_CAPACITY>()
    }

    /// Build with room for up to `CAP` chips.
    pub fn build_with_capacity<const CAP: usize>(
        self,
    ) -> Result<GpioShadow<Transport<SPI, LATCH, CLK, DATA>, CAP>, ShadowError> {
        let chip_count = self.chip_count;
        let transport = self.resolve()?;
        GpioShadow::new(transport, chip_count)
    }

    fn resolve(self) -> Result<Transport<SPI, LATCH, CLK, DATA>, ConfigError> {
        let config = self.config;
        match (self.spi, self.latch, self.clock, self.data) {
            (Some(_), _, Some(_), _) | (Some(_), _, _, Some(_)) => {
                Err(ConfigError::AmbiguousTransport)
            }
            (Some(spi), Some(latch), None, None) => Ok(Transport::Serial(
                SerialBus::with_config(spi, latch, config),
            )),
            (Some(_), None, None, None) => Err(ConfigError::MissingLatch),
            (None, Some(latch), Some(clock), Some(data)) => {
                Ok(Transport::Manual(BitBang::new(latch, clock, data)))
            }
            (None, None, None, None) => Err(ConfigError::MissingTransport),
            (None, _, _, _) => Err(ConfigError::IncompleteManual),
        }
    }
}
