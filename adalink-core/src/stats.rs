//! Frame counters for logging

/// Running totals since power-on, all saturating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Frames drained and latched
    pub frames_latched: u32,
    /// Payload bytes written to the strip
    pub bytes_drained: u32,
    /// Headers rejected for a bad checksum
    pub checksum_errors: u32,
    /// Headers rejected for exceeding the buffer
    pub oversized_frames: u32,
    /// Partial frames abandoned after the idle timeout
    pub stalls: u32,
    /// Failed reads from the host link
    pub read_errors: u32,
    /// Failed writes to the strip
    pub write_errors: u32,
}

impl FrameStats {
    pub fn record_drain(&mut self, written: usize, errors: usize) {
        self.bytes_drained = self.bytes_drained.saturating_add(saturate(written));
        self.write_errors = self.write_errors.saturating_add(saturate(errors));
    }

    pub fn record_latched(&mut self) {
        self.frames_latched = self.frames_latched.saturating_add(1);
    }

    pub fn record_checksum_error(&mut self) {
        self.checksum_errors = self.checksum_errors.saturating_add(1);
    }

    pub fn record_oversized(&mut self) {
        self.oversized_frames = self.oversized_frames.saturating_add(1);
    }

    pub fn record_stall(&mut self) {
        self.stalls = self.stalls.saturating_add(1);
    }

    pub fn record_read_error(&mut self) {
        self.read_errors = self.read_errors.saturating_add(1);
    }

    /// Headers thrown away for any reason
    pub fn rejected(&self) -> u32 {
        self.checksum_errors.saturating_add(self.oversized_frames)
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = FrameStats::default();
        stats.record_drain(150, 0);
        stats.record_latched();
        stats.record_checksum_error();
        stats.record_oversized();
        stats.record_oversized();

        assert_eq!(stats.frames_latched, 1);
        assert_eq!(stats.bytes_drained, 150);
        assert_eq!(stats.rejected(), 3);
    }

    #[test]
    fn test_saturates() {
        let mut stats = FrameStats {
            stalls: u32::MAX,
            ..Default::default()
        };
        stats.record_stall();
        stats.record_drain(usize::MAX, 0);

        assert_eq!(stats.stalls, u32::MAX);
        assert_eq!(stats.bytes_drained, u32::MAX);
    }
}
