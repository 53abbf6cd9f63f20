//! Stalled-link detection
//!
//! The wire format has no end marker, so a host that disappears mid-frame
//! would otherwise park the decoder forever. The monitor remembers when
//! the last byte arrived and reports a stall once the idle timeout passes.

/// Idle-timeout tracker for partially received frames
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    /// Timeout in ms, `None` disables stall detection
    idle_timeout_ms: Option<u32>,
    /// Timestamp of the last inbound byte (ms)
    last_byte_ms: Option<u32>,
}

impl LinkMonitor {
    pub fn new(idle_timeout_ms: Option<u32>) -> Self {
        Self {
            idle_timeout_ms,
            last_byte_ms: None,
        }
    }

    /// Record a byte received at `now_ms`
    pub fn byte_received(&mut self, now_ms: u32) {
        self.last_byte_ms = Some(now_ms);
    }

    /// Forget the last byte (after a stall has been handled)
    pub fn clear(&mut self) {
        self.last_byte_ms = None;
    }

    /// Milliseconds since the last byte, wrapping with the clock
    pub fn idle_ms(&self, now_ms: u32) -> Option<u32> {
        self.last_byte_ms.map(|last| now_ms.wrapping_sub(last))
    }

    /// Check whether the idle timeout has elapsed
    pub fn is_stalled(&self, now_ms: u32) -> bool {
        match (self.idle_timeout_ms, self.idle_ms(now_ms)) {
            (Some(timeout), Some(idle)) => idle >= timeout,
            _ => false,
        }
    }

    pub fn idle_timeout_ms(&self) -> Option<u32> {
        self.idle_timeout_ms
    }
}
