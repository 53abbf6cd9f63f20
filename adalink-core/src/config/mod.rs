//! Configuration types
//!
//! Compile-time defaults for the control loop and the power-on animation.
//! Nothing is persisted; the firmware builds these once at boot.

pub mod types;

pub use types::*;
