//! State machine definition
//!
//! Whether a byte is read, drained or waited on is a function of the
//! current state only.

use adalink_protocol::DecodePhase;

use super::events::Event;

/// Protocol states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolState {
    /// Scanning the inbound stream for the marker
    #[default]
    SeekingMagic,
    /// Marker seen, reading HI, LO, CHECKSUM
    ReadingHeader,
    /// Header valid, accumulating payload bytes
    ReadingPayload,
    /// Payload drained, waiting out the strip's settle time
    Latching,
}

impl ProtocolState {
    /// Check if inbound bytes are read in this state
    pub fn accepts_input(&self) -> bool {
        !matches!(self, ProtocolState::Latching)
    }

    /// Check if a frame is partially received
    pub fn is_mid_frame(&self) -> bool {
        matches!(
            self,
            ProtocolState::ReadingHeader | ProtocolState::ReadingPayload
        )
    }

    /// Process an event and return the next state
    ///
    /// Pairs not listed leave the state unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use ProtocolState::*;

        match (self, event) {
            (SeekingMagic, MarkerMatched) => ReadingHeader,

            (ReadingHeader, HeaderAccepted) => ReadingPayload,
            (ReadingHeader, HeaderRejected) => SeekingMagic,
            (ReadingHeader, FrameOversized) => SeekingMagic,
            (ReadingHeader, LinkStalled) => SeekingMagic,

            (ReadingPayload, PayloadComplete) => Latching,
            (ReadingPayload, LinkStalled) => SeekingMagic,

            (Latching, SettleComplete) => SeekingMagic,

            _ => self,
        }
    }
}

impl From<DecodePhase> for ProtocolState {
    fn from(phase: DecodePhase) -> Self {
        match phase {
            DecodePhase::SeekingMagic => ProtocolState::SeekingMagic,
            DecodePhase::ReadingHeader => ProtocolState::ReadingHeader,
            DecodePhase::ReadingPayload => ProtocolState::ReadingPayload,
            DecodePhase::Complete => ProtocolState::Latching,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [ProtocolState; 4] = [
        ProtocolState::SeekingMagic,
        ProtocolState::ReadingHeader,
        ProtocolState::ReadingPayload,
        ProtocolState::Latching,
    ];

    #[test]
    fn test_initial_state() {
        assert_eq!(ProtocolState::default(), ProtocolState::SeekingMagic);
    }

    #[test]
    fn test_full_frame_cycle() {
        let state = ProtocolState::SeekingMagic;

        let header = state.transition(Event::MarkerMatched);
        assert_eq!(header, ProtocolState::ReadingHeader);

        let payload = header.transition(Event::HeaderAccepted);
        assert_eq!(payload, ProtocolState::ReadingPayload);

        let latching = payload.transition(Event::PayloadComplete);
        assert_eq!(latching, ProtocolState::Latching);

        let seeking = latching.transition(Event::SettleComplete);
        assert_eq!(seeking, ProtocolState::SeekingMagic);
    }

    #[test]
    fn test_header_failures_resync() {
        for event in [Event::HeaderRejected, Event::FrameOversized] {
            let next = ProtocolState::ReadingHeader.transition(event);
            assert_eq!(next, ProtocolState::SeekingMagic);
        }
    }

    #[test]
    fn test_stall_only_abandons_partial_frames() {
        assert_eq!(
            ProtocolState::ReadingHeader.transition(Event::LinkStalled),
            ProtocolState::SeekingMagic
        );
        assert_eq!(
            ProtocolState::ReadingPayload.transition(Event::LinkStalled),
            ProtocolState::SeekingMagic
        );
        assert_eq!(
            ProtocolState::Latching.transition(Event::LinkStalled),
            ProtocolState::Latching
        );
    }

    #[test]
    fn test_latching_ignores_decoder_events() {
        for event in [
            Event::MarkerMatched,
            Event::HeaderAccepted,
            Event::HeaderRejected,
            Event::PayloadComplete,
        ] {
            assert_eq!(
                ProtocolState::Latching.transition(event),
                ProtocolState::Latching
            );
        }
    }

    #[test]
    fn test_settle_complete_only_leaves_latching() {
        for state in ALL_STATES {
            let next = state.transition(Event::SettleComplete);
            if state == ProtocolState::Latching {
                assert_eq!(next, ProtocolState::SeekingMagic);
            } else {
                assert_eq!(next, state);
            }
        }
    }

    #[test]
    fn test_accepts_input() {
        assert!(ProtocolState::SeekingMagic.accepts_input());
        assert!(ProtocolState::ReadingHeader.accepts_input());
        assert!(ProtocolState::ReadingPayload.accepts_input());
        assert!(!ProtocolState::Latching.accepts_input());
    }

    #[test]
    fn test_from_decode_phase() {
        assert_eq!(
            ProtocolState::from(DecodePhase::Complete),
            ProtocolState::Latching
        );
        assert_eq!(
            ProtocolState::from(DecodePhase::ReadingPayload),
            ProtocolState::ReadingPayload
        );
    }
}
