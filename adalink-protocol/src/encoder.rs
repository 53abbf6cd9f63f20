//! Host-side frame encoding
//!
//! Builds complete wire frames from raw RGB bytes. The device never sends
//! frames; this is for host tools and tests.

use heapless::Vec;

use crate::frame::{FrameError, FrameHeader, BYTES_PER_PIXEL, HEADER_LEN, MAGIC, MAX_PAYLOAD_LEN};

/// Total wire size of a frame carrying `payload_len` bytes
pub const fn frame_len(payload_len: usize) -> usize {
    MAGIC.len() + HEADER_LEN + payload_len
}

/// Encode a frame into `buffer`
///
/// `pixels` must hold between 1 and 65 536 whole RGB triples.
/// Returns the number of bytes written.
pub fn encode_frame(pixels: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    if pixels.is_empty() || pixels.len() % BYTES_PER_PIXEL != 0 || pixels.len() > MAX_PAYLOAD_LEN
    {
        return Err(FrameError::InvalidPixelData);
    }

    let len = frame_len(pixels.len());
    if buffer.len() < len {
        return Err(FrameError::BufferTooSmall);
    }

    let header = FrameHeader::for_pixels(pixels.len() / BYTES_PER_PIXEL)?;

    buffer[..3].copy_from_slice(&MAGIC);
    buffer[3..6].copy_from_slice(&header.to_bytes());
    buffer[6..len].copy_from_slice(pixels);

    Ok(len)
}

/// Encode a frame into a heapless Vec of capacity `M`
pub fn encode_frame_to_vec<const M: usize>(pixels: &[u8]) -> Result<Vec<u8, M>, FrameError> {
    let mut vec = Vec::new();
    vec.resize(frame_len(pixels.len()), 0)
        .map_err(|_| FrameError::BufferTooSmall)?;
    let len = encode_frame(pixels, &mut vec)?;
    vec.truncate(len);
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::FrameDecoder;

    #[test]
    fn test_encode_two_pixels() {
        let mut buffer = [0u8; 16];
        let len = encode_frame(&[1, 2, 3, 4, 5, 6], &mut buffer).unwrap();

        assert_eq!(len, 12);
        assert_eq!(&buffer[..3], b"Ada");
        assert_eq!(buffer[3], 0x00); // hi
        assert_eq!(buffer[4], 0x01); // lo: two LEDs, count minus one
        assert_eq!(buffer[5], 0x57); // 0x00 ^ 0x01 ^ 0x56
        assert_eq!(&buffer[6..12], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rejects_partial_pixel() {
        let mut buffer = [0u8; 16];
        assert_eq!(
            encode_frame(&[1, 2, 3, 4], &mut buffer),
            Err(FrameError::InvalidPixelData)
        );
        assert_eq!(encode_frame(&[], &mut buffer), Err(FrameError::InvalidPixelData));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buffer = [0u8; 8];
        assert_eq!(
            encode_frame(&[1, 2, 3], &mut buffer),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_encoded_frame_decodes() {
        let pixels = [0xFF, 0x00, 0x80, 0x10, 0x20, 0x30, 0x00, 0x00, 0x01];
        let frame: Vec<u8, 32> = encode_frame_to_vec(&pixels).unwrap();

        let mut decoder = FrameDecoder::<9>::new();
        assert_eq!(decoder.feed_bytes(&frame), Ok(Some(frame.len())));
        assert_eq!(decoder.payload(), Some(&pixels[..]));
    }

    #[test]
    fn test_vec_too_small() {
        let result: Result<Vec<u8, 8>, _> = encode_frame_to_vec(&[1, 2, 3]);
        assert_eq!(result, Err(FrameError::BufferTooSmall));
    }
}
