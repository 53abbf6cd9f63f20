//! Strip output over SPI
//!
//! Any blocking `embedded-hal` SPI bus can drive the strip. On the RP2040
//! this is an `embassy_rp::spi::Spi` in blocking, transmit-only mode.

use adalink_hal::spi::{Phase, Polarity, SpiConfig};
use embassy_rp::spi;
use embedded_hal::spi::SpiBus as HalSpiBus;

/// Convert the shared SPI configuration to the embassy-rp one
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}

/// Transmit-only SPI master feeding the strip
pub struct StripSpi<S> {
    spi: S,
}

impl<S: HalSpiBus<u8>> StripSpi<S> {
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Get the wrapped bus back
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: HalSpiBus<u8>> adalink_hal::SpiBus for StripSpi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // embedded-hal writes may return before the FIFO drains
        self.spi.write(data)?;
        self.spi.flush()
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush()
    }
}
