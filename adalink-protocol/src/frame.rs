//! Frame header and error types for the Adalight protocol.
//!
//! Frame format:
//! - MAGIC (3 bytes): `b"Ada"` synchronization marker
//! - HI (1 byte): high byte of the LED count minus one
//! - LO (1 byte): low byte of the LED count minus one
//! - CHECKSUM (1 byte): HI ^ LO ^ 0x56
//! - PAYLOAD: 3 bytes per LED, sent to the strip in arrival order

use core::fmt;

/// Frame synchronization marker
pub const MAGIC: [u8; 3] = *b"Ada";

/// Constant folded into the header checksum
pub const CHECKSUM_KEY: u8 = 0x56;

/// Header size in bytes (HI, LO, CHECKSUM)
pub const HEADER_LEN: usize = 3;

/// Colour channels per LED
pub const BYTES_PER_PIXEL: usize = 3;

/// Largest payload a header can describe (65 536 LEDs)
pub const MAX_PAYLOAD_LEN: usize = BYTES_PER_PIXEL * (u16::MAX as usize + 1);

/// Pixel buffer size of the reference device (500 RGB LEDs)
pub const PIXEL_BUFFER_CAPACITY: usize = 1500;

/// Sent to the host when the serial link comes up
pub const GREETING: &[u8] = b"Zup?\n";

/// Errors that can occur during frame decoding or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Header checksum mismatch
    InvalidChecksum {
        /// Checksum computed from HI and LO
        expected: u8,
        /// Checksum byte received
        actual: u8,
    },
    /// Declared payload does not fit the pixel buffer
    Oversized {
        /// Payload length declared by the header
        payload_len: usize,
        /// Pixel buffer capacity
        capacity: usize,
    },
    /// A completed frame has not been released yet
    FramePending,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Pixel data is empty, not a whole number of pixels, or too long
    InvalidPixelData,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidChecksum { expected, actual } => write!(
                f,
                "header checksum mismatch: expected {expected:#04x}, got {actual:#04x}"
            ),
            FrameError::Oversized {
                payload_len,
                capacity,
            } => write!(
                f,
                "frame payload of {payload_len} bytes exceeds buffer capacity {capacity}"
            ),
            FrameError::FramePending => write!(f, "previous frame not yet latched"),
            FrameError::BufferTooSmall => write!(f, "output buffer too small"),
            FrameError::InvalidPixelData => write!(f, "invalid pixel data length"),
        }
    }
}

/// The three header bytes that follow the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameHeader {
    /// First byte after the marker
    pub hi: u8,
    /// Second byte after the marker
    pub lo: u8,
    /// Third byte after the marker
    pub checksum: u8,
}

impl FrameHeader {
    /// Build a header from bytes in arrival order
    pub const fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self {
            hi: bytes[0],
            lo: bytes[1],
            checksum: bytes[2],
        }
    }

    /// Build a valid header describing `led_count` LEDs
    ///
    /// The wire carries the count minus one, so `led_count` must be in
    /// `1..=65536`.
    pub fn for_pixels(led_count: usize) -> Result<Self, FrameError> {
        if led_count == 0 || led_count > u16::MAX as usize + 1 {
            return Err(FrameError::InvalidPixelData);
        }

        let [hi, lo] = ((led_count - 1) as u16).to_be_bytes();
        Ok(Self {
            hi,
            lo,
            checksum: Self::expected_checksum(hi, lo),
        })
    }

    /// Checksum a sender must transmit for the given count bytes
    pub const fn expected_checksum(hi: u8, lo: u8) -> u8 {
        hi ^ lo ^ CHECKSUM_KEY
    }

    /// Check the checksum byte
    pub fn validate(&self) -> Result<(), FrameError> {
        let expected = Self::expected_checksum(self.hi, self.lo);
        if self.checksum != expected {
            return Err(FrameError::InvalidChecksum {
                expected,
                actual: self.checksum,
            });
        }
        Ok(())
    }

    /// Whether the checksum byte matches HI and LO
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// The 16-bit count field, `(HI << 8) | LO`
    pub const fn pixel_count(&self) -> u16 {
        u16::from_be_bytes([self.hi, self.lo])
    }

    /// Number of LEDs in the payload (count field plus one)
    pub const fn led_count(&self) -> usize {
        self.pixel_count() as usize + 1
    }

    /// Payload length in bytes, always at least 3
    pub const fn payload_len(&self) -> usize {
        BYTES_PER_PIXEL * self.led_count()
    }

    /// Header bytes in wire order
    pub const fn to_bytes(&self) -> [u8; HEADER_LEN] {
        [self.hi, self.lo, self.checksum]
    }
}
