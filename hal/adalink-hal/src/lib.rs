//! adalink Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the LED bridge core is written
//! against. Chip-specific HALs implement them, and the host-side tests
//! implement them with plain in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  adalink-core (decoder, latch, loop)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  adalink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ adalink-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::ByteSource`] - Polled inbound byte stream from the host
//! - [`spi::SpiBus`] - Blocking serial output to the LED driver
//! - [`delay::DelayUs`] - Fixed-duration blocking waits
//! - [`gpio::OutputPin`] - Activity LED

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod serial;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::OutputPin;
pub use serial::ByteSource;
pub use spi::SpiBus;
