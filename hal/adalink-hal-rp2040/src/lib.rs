//! RP2040-specific HAL for the LED bridge firmware
//!
//! This crate provides RP2040 implementations of the shared `adalink-hal`
//! traits:
//!
//! - Strip output over a blocking SPI peripheral
//! - Activity LED on a GPIO output
//! - Busy-wait delays for latch and animation timing
//! - Host byte source fed by the USB receive task

#![no_std]

pub mod delay;
pub mod gpio;
pub mod serial;
pub mod spi;

pub use delay::BlockingDelay;
pub use gpio::ActivityLed;
pub use serial::{PipeSource, SerialError};
pub use spi::{spi_config, StripSpi};

// Re-export shared traits from adalink-hal for convenience
pub use adalink_hal::{ByteSource, DelayUs, OutputPin, SpiBus};
