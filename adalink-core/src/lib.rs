//! Board-agnostic core logic for the LED bridge firmware
//!
//! This crate contains everything between "a byte arrived from the host"
//! and "the strip has latched", independent of the chip:
//!
//! - Protocol state machine (marker, header, payload, latch)
//! - Transmit and latch timing
//! - Stalled-link detection
//! - Frame statistics
//! - Configuration type definitions
//! - Power-on animation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod config;
pub mod controller;
pub mod latch;
pub mod link;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Controller, DefaultController, Poll};
