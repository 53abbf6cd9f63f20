//! Inter-task communication channels
//!
//! The USB receive task is the only writer and the controller task the only
//! reader of [`RX_PIPE`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;

/// Bytes buffered between the USB endpoint and the control loop
pub const RX_PIPE_SIZE: usize = 1024;

/// Host bytes waiting for the control loop
pub static RX_PIPE: Pipe<CriticalSectionRawMutex, RX_PIPE_SIZE> = Pipe::new();
