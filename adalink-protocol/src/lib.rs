//! Adalight LED streaming protocol
//!
//! This crate defines the byte protocol a host uses to push pixel colours
//! to the bridge over a serial link. It is `no_std` and allocation-free so
//! the same decoder runs on the device and in host tests.
//!
//! # Protocol Overview
//!
//! A frame is a fixed marker, a three byte header and a payload whose
//! length is derived from the header:
//! ```text
//! ┌─────┬─────┬─────┬─────┬─────┬──────────┬──────────────────────┐
//! │ 'A' │ 'd' │ 'a' │ HI  │ LO  │ CHECKSUM │ PAYLOAD              │
//! │ 1B  │ 1B  │ 1B  │ 1B  │ 1B  │ 1B       │ 3 × ((HI<<8|LO) + 1) │
//! └─────┴─────┴─────┴─────┴─────┴──────────┴──────────────────────┘
//! ```
//!
//! `CHECKSUM = HI ^ LO ^ CHECKSUM_KEY` where [`CHECKSUM_KEY`] is `0x56`.
//! There is no end-of-frame marker; the header length is authoritative.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod magic;

pub use buffer::{CapacityError, PixelBuffer};
pub use decoder::{DecodePhase, Decoded, FrameDecoder};
pub use encoder::{encode_frame, encode_frame_to_vec};
pub use frame::{
    FrameError, FrameHeader, BYTES_PER_PIXEL, CHECKSUM_KEY, GREETING, HEADER_LEN, MAGIC,
    MAX_PAYLOAD_LEN, PIXEL_BUFFER_CAPACITY,
};
pub use magic::MagicWindow;
