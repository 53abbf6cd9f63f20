//! Host byte source
//!
//! The USB task writes received packets into a [`Pipe`]; the control loop
//! drains it one byte at a time without awaiting. While the loop is busy
//! latching, bytes stay queued in the pipe. Once the pipe is full the USB
//! task stops reading and the host is held off by NAKs, so no byte is
//! dropped.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::pipe::{Pipe, TryReadError};

/// Errors reading from the host link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Read attempted with nothing queued
    Empty,
}

/// Reads host bytes queued by the USB receive task
pub struct PipeSource<'p, M: RawMutex, const N: usize> {
    pipe: &'p Pipe<M, N>,
}

impl<'p, M: RawMutex, const N: usize> PipeSource<'p, M, N> {
    pub fn new(pipe: &'p Pipe<M, N>) -> Self {
        Self { pipe }
    }
}

impl<'p, M: RawMutex, const N: usize> adalink_hal::ByteSource for PipeSource<'p, M, N> {
    type Error = SerialError;

    fn is_ready(&mut self) -> bool {
        !self.pipe.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        let mut byte = [0u8; 1];
        match self.pipe.try_read(&mut byte) {
            Ok(_) => Ok(byte[0]),
            Err(TryReadError::Empty) => Err(SerialError::Empty),
        }
    }
}
