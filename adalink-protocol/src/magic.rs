//! Marker scanner
//!
//! Keeps the last three inbound bytes and reports when they spell the frame
//! marker. Every byte re-tests the whole window, so a false start such as
//! `A d A d a` still synchronizes on the final `a`.

use crate::frame::MAGIC;

/// Sliding window over the most recent three bytes
#[derive(Debug, Clone)]
pub struct MagicWindow {
    marker: [u8; 3],
    /// Most recent byte first
    window: [u8; 3],
    /// Bytes seen since the last clear, saturating at 3
    filled: u8,
}

impl Default for MagicWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl MagicWindow {
    /// Create a scanner for the Adalight marker
    pub const fn new() -> Self {
        Self::with_marker(MAGIC)
    }

    /// Create a scanner for an arbitrary 3-byte marker
    pub const fn with_marker(marker: [u8; 3]) -> Self {
        Self {
            marker,
            window: [0; 3],
            filled: 0,
        }
    }

    /// Shift a byte in and test for the marker
    ///
    /// Returns `true` on an exact match; the window is cleared so the
    /// matched bytes cannot take part in another match.
    pub fn push(&mut self, byte: u8) -> bool {
        self.window = [byte, self.window[0], self.window[1]];
        if self.filled < 3 {
            self.filled += 1;
        }

        if self.is_match() {
            self.clear();
            return true;
        }
        false
    }

    /// Forget every byte seen so far
    pub fn clear(&mut self) {
        self.window = [0; 3];
        self.filled = 0;
    }

    fn is_match(&self) -> bool {
        // Window is newest-first, marker is oldest-first
        self.filled == 3
            && self.window[2] == self.marker[0]
            && self.window[1] == self.marker[1]
            && self.window[0] == self.marker[2]
    }
}
