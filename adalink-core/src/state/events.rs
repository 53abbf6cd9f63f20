//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Decoder events
    /// The last three bytes spelled the frame marker
    MarkerMatched,
    /// Header checksum valid and payload fits the buffer
    HeaderAccepted,
    /// Header checksum invalid
    HeaderRejected,
    /// Header declared more payload than the buffer holds
    FrameOversized,
    /// Final payload byte stored
    PayloadComplete,

    // Latch events
    /// Settle ticks elapsed after the drain
    SettleComplete,

    // Link events
    /// No byte arrived mid-frame within the idle timeout
    LinkStalled,
}
