//! Byte-at-a-time frame decoder
//!
//! The decoder is fed one inbound byte at a time and walks
//! marker → header → payload. Once the payload is complete it holds the
//! frame until [`FrameDecoder::release`] is called; the caller drains and
//! latches the strip in between.

use crate::buffer::PixelBuffer;
use crate::frame::{FrameError, FrameHeader, HEADER_LEN};
use crate::magic::MagicWindow;

/// Where the decoder is within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodePhase {
    /// Scanning for the marker
    SeekingMagic,
    /// Marker seen, collecting HI, LO, CHECKSUM
    ReadingHeader,
    /// Header accepted, collecting payload bytes
    ReadingPayload,
    /// Payload complete, waiting for release
    Complete,
}

/// What a single fed byte did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// Byte was not part of a marker
    Scanning,
    /// Byte completed the marker
    MarkerMatched,
    /// Byte stored as header byte 1 or 2
    HeaderByte,
    /// Byte completed a valid header
    HeaderAccepted(FrameHeader),
    /// Byte stored in the payload
    PayloadByte,
    /// Byte completed the payload; the frame is ready
    PayloadComplete,
}

/// State machine for decoding inbound frames
///
/// `N` is the pixel buffer capacity in bytes. Headers declaring more than
/// `N` payload bytes are rejected before any payload byte is stored.
#[derive(Debug, Clone)]
pub struct FrameDecoder<const N: usize> {
    phase: DecodePhase,
    window: MagicWindow,
    header: [u8; HEADER_LEN],
    header_len: usize,
    current: Option<FrameHeader>,
    expected_len: usize,
    payload: PixelBuffer<N>,
}

impl<const N: usize> Default for FrameDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameDecoder<N> {
    /// Create a new decoder
    pub const fn new() -> Self {
        Self {
            phase: DecodePhase::SeekingMagic,
            window: MagicWindow::new(),
            header: [0; HEADER_LEN],
            header_len: 0,
            current: None,
            expected_len: 0,
            payload: PixelBuffer::new(),
        }
    }

    /// Abandon any partial frame and scan for the next marker
    pub fn reset(&mut self) {
        self.phase = DecodePhase::SeekingMagic;
        self.window.clear();
        self.header_len = 0;
        self.current = None;
        self.expected_len = 0;
        self.payload.clear();
    }

    /// Release a completed frame after it has been latched
    pub fn release(&mut self) {
        self.reset();
    }

    /// Feed a single byte to the decoder
    ///
    /// Checksum and length failures discard the header and return the
    /// decoder to [`DecodePhase::SeekingMagic`]; the consumed header bytes
    /// are never rescanned as marker bytes.
    pub fn feed(&mut self, byte: u8) -> Result<Decoded, FrameError> {
        match self.phase {
            DecodePhase::SeekingMagic => {
                if self.window.push(byte) {
                    self.header_len = 0;
                    self.phase = DecodePhase::ReadingHeader;
                    return Ok(Decoded::MarkerMatched);
                }
                Ok(Decoded::Scanning)
            }
            DecodePhase::ReadingHeader => {
                self.header[self.header_len] = byte;
                self.header_len += 1;
                if self.header_len < HEADER_LEN {
                    return Ok(Decoded::HeaderByte);
                }

                let header = FrameHeader::from_bytes(self.header);
                if let Err(e) = header.validate() {
                    self.reset();
                    return Err(e);
                }

                let payload_len = header.payload_len();
                if payload_len > N {
                    self.reset();
                    return Err(FrameError::Oversized {
                        payload_len,
                        capacity: N,
                    });
                }

                self.current = Some(header);
                self.expected_len = payload_len;
                self.payload.clear();
                self.phase = DecodePhase::ReadingPayload;
                Ok(Decoded::HeaderAccepted(header))
            }
            DecodePhase::ReadingPayload => {
                if self.payload.push(byte).is_err() {
                    // Unreachable while expected_len <= N, kept as a hard stop
                    let payload_len = self.expected_len;
                    self.reset();
                    return Err(FrameError::Oversized {
                        payload_len,
                        capacity: N,
                    });
                }

                if self.payload.len() == self.expected_len {
                    self.phase = DecodePhase::Complete;
                    return Ok(Decoded::PayloadComplete);
                }
                Ok(Decoded::PayloadByte)
            }
            DecodePhase::Complete => Err(FrameError::FramePending),
        }
    }

    /// Feed bytes until a frame completes
    ///
    /// Returns `Ok(Some(n))` with the number of bytes consumed when a frame
    /// completes, `Ok(None)` when every byte was consumed without completing
    /// one. Stops at the first error.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<usize>, FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if self.feed(byte)? == Decoded::PayloadComplete {
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }

    pub fn phase(&self) -> DecodePhase {
        self.phase
    }

    /// Header of the frame being read or held
    pub fn header(&self) -> Option<FrameHeader> {
        self.current
    }

    /// Payload length declared by the current header
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    /// Payload bytes received so far
    pub fn received(&self) -> usize {
        self.payload.len()
    }

    /// The completed payload, if a frame is held
    pub fn payload(&self) -> Option<&[u8]> {
        match self.phase {
            DecodePhase::Complete => Some(self.payload.as_slice()),
            _ => None,
        }
    }

    /// Whether a frame is partially received
    pub fn is_mid_frame(&self) -> bool {
        matches!(
            self.phase,
            DecodePhase::ReadingHeader | DecodePhase::ReadingPayload
        )
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{CHECKSUM_KEY, MAGIC, PIXEL_BUFFER_CAPACITY};

    type Decoder = FrameDecoder<PIXEL_BUFFER_CAPACITY>;

    fn header_bytes(hi: u8, lo: u8) -> [u8; 3] {
        [hi, lo, hi ^ lo ^ CHECKSUM_KEY]
    }

    #[test]
    fn test_single_pixel_frame() {
        let mut decoder = Decoder::new();
        let mut data = heapless::Vec::<u8, 16>::new();
        data.extend_from_slice(&MAGIC).unwrap();
        data.extend_from_slice(&header_bytes(0, 0)).unwrap();
        data.extend_from_slice(&[0x10, 0x20, 0x30]).unwrap();

        assert_eq!(decoder.feed_bytes(&data), Ok(Some(9)));
        assert_eq!(decoder.phase(), DecodePhase::Complete);
        assert_eq!(decoder.payload(), Some(&[0x10, 0x20, 0x30][..]));
    }

    #[test]
    fn test_phases_in_order() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.feed(b'A'), Ok(Decoded::Scanning));
        assert_eq!(decoder.feed(b'd'), Ok(Decoded::Scanning));
        assert_eq!(decoder.feed(b'a'), Ok(Decoded::MarkerMatched));
        assert_eq!(decoder.phase(), DecodePhase::ReadingHeader);

        assert_eq!(decoder.feed(0x00), Ok(Decoded::HeaderByte));
        assert_eq!(decoder.feed(0x01), Ok(Decoded::HeaderByte));
        let accepted = decoder.feed(0x57).unwrap();
        assert_eq!(
            accepted,
            Decoded::HeaderAccepted(FrameHeader::from_bytes([0x00, 0x01, 0x57]))
        );
        assert_eq!(decoder.expected_len(), 6);

        for b in 0..5 {
            assert_eq!(decoder.feed(b), Ok(Decoded::PayloadByte));
        }
        assert_eq!(decoder.feed(5), Ok(Decoded::PayloadComplete));
        assert_eq!(decoder.payload(), Some(&[0, 1, 2, 3, 4, 5][..]));
    }

    #[test]
    fn test_bad_checksum_resyncs() {
        let mut decoder = Decoder::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed(0x00).unwrap();
        decoder.feed(0x00).unwrap();

        assert_eq!(
            decoder.feed(0x00),
            Err(FrameError::InvalidChecksum {
                expected: 0x56,
                actual: 0x00,
            })
        );
        assert_eq!(decoder.phase(), DecodePhase::SeekingMagic);
        assert_eq!(decoder.received(), 0);
    }

    #[test]
    fn test_header_bytes_not_rescanned_as_marker() {
        // Rejected header ends in "Ad"; if it were rescanned, one more 'a'
        // would complete a marker.
        let mut decoder = Decoder::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed(0x00).unwrap();
        decoder.feed(b'A').unwrap();
        assert!(decoder.feed(b'd').is_err());

        assert_eq!(decoder.feed(b'a'), Ok(Decoded::Scanning));
        assert_eq!(decoder.phase(), DecodePhase::SeekingMagic);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut decoder = FrameDecoder::<6>::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed(0x00).unwrap();
        decoder.feed(0x02).unwrap();

        assert_eq!(
            decoder.feed(0x02 ^ CHECKSUM_KEY),
            Err(FrameError::Oversized {
                payload_len: 9,
                capacity: 6,
            })
        );
        assert_eq!(decoder.phase(), DecodePhase::SeekingMagic);
        assert_eq!(decoder.received(), 0);
    }

    #[test]
    fn test_frame_filling_capacity_exactly() {
        let mut decoder = FrameDecoder::<6>::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed_bytes(&header_bytes(0, 1)).unwrap();

        assert_eq!(decoder.feed_bytes(&[9, 8, 7, 6, 5, 4]), Ok(Some(6)));
        assert_eq!(decoder.payload(), Some(&[9, 8, 7, 6, 5, 4][..]));
    }

    #[test]
    fn test_complete_frame_refuses_bytes_until_released() {
        let mut decoder = Decoder::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed_bytes(&header_bytes(0, 0)).unwrap();
        decoder.feed_bytes(&[1, 2, 3]).unwrap();

        assert_eq!(decoder.feed(b'A'), Err(FrameError::FramePending));
        assert_eq!(decoder.payload(), Some(&[1, 2, 3][..]));

        decoder.release();
        assert_eq!(decoder.phase(), DecodePhase::SeekingMagic);
        assert_eq!(decoder.payload(), None);
        assert_eq!(decoder.received(), 0);
    }

    #[test]
    fn test_reset_mid_payload() {
        let mut decoder = Decoder::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed_bytes(&header_bytes(0, 3)).unwrap();
        decoder.feed_bytes(&[1, 2, 3, 4]).unwrap();
        assert!(decoder.is_mid_frame());

        decoder.reset();
        assert!(!decoder.is_mid_frame());
        assert_eq!(decoder.header(), None);
        assert_eq!(decoder.feed_bytes(&[1, 2, 3]), Ok(None));
        assert_eq!(decoder.phase(), DecodePhase::SeekingMagic);
    }

    #[test]
    fn test_marker_bytes_inside_payload_are_data() {
        let mut decoder = Decoder::new();
        decoder.feed_bytes(&MAGIC).unwrap();
        decoder.feed_bytes(&header_bytes(0, 1)).unwrap();

        assert_eq!(decoder.feed_bytes(b"AdaAda"), Ok(Some(6)));
        assert_eq!(decoder.payload(), Some(&b"AdaAda"[..]));
    }
}
