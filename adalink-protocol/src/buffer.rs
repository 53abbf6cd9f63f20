//! Bounded pixel storage
//!
//! Payload bytes land here in arrival order. Writes past the capacity fail
//! instead of corrupting memory, whatever a frame header claims.

use heapless::Vec;

use crate::frame::BYTES_PER_PIXEL;

/// Write attempted on a full buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

/// Fixed-capacity byte buffer filled from index 0
#[derive(Debug, Clone, Default)]
pub struct PixelBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> PixelBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a byte at the write cursor
    pub fn push(&mut self, byte: u8) -> Result<(), CapacityError> {
        self.bytes.push(byte).map_err(|_| CapacityError)
    }

    /// Reset the write cursor to 0
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Current write cursor
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes written so far, in arrival order
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Complete RGB triples written so far
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.bytes
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|c| [c[0], c[1], c[2]])
    }
}
