//! Control loop
//!
//! [`Controller::poll`] is one iteration of the bridge's main loop. Each
//! call reads at most one host byte or waits at most one settle tick, so
//! the caller can service USB between iterations.
//!
//! ```text
//!            marker              header ok           payload done
//! SeekingMagic ──────▶ ReadingHeader ──────▶ ReadingPayload ──────▶ Latching
//!      ▲                    │ bad checksum /          │ idle            │
//!      │                    │ oversized / idle        │ timeout         │ settle
//!      └────────────────────┴─────────────────────────┴─────────────────┘
//! ```

use adalink_hal::{ByteSource, DelayUs, OutputPin, SpiBus};
use adalink_protocol::{Decoded, FrameDecoder, FrameError, FrameHeader, PIXEL_BUFFER_CAPACITY};

use crate::config::{ConfigError, ControllerConfig};
use crate::latch::{Settle, TransmitLatch};
use crate::link::LinkMonitor;
use crate::state::{Event, ProtocolState};
use crate::stats::FrameStats;

/// Controller sized for the reference 1500-byte pixel buffer
pub type DefaultController<S, B, D, L> = Controller<S, B, D, L, PIXEL_BUFFER_CAPACITY>;

/// What one loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// No byte available, nothing to do
    Idle,
    /// One byte consumed without changing state
    Consumed,
    /// Marker found
    Synchronized,
    /// Header validated, payload follows
    HeaderAccepted(FrameHeader),
    /// Header discarded, scanning again
    Rejected(FrameError),
    /// Payload shifted out to the strip and the first settle tick waited
    Drained { bytes: usize },
    /// One settle tick waited
    Settling { tick: u8 },
    /// Settle window over, ready for the next frame
    Latched,
    /// Partial frame abandoned after the idle timeout
    Stalled,
    /// The host link reported an error
    ReadError,
}

/// The bridge's protocol engine
///
/// Owns the decoder, the latch timing and all hardware collaborators. All
/// protocol state lives here; nothing is shared.
pub struct Controller<S, B, D, L, const N: usize> {
    source: S,
    bus: B,
    delay: D,
    led: L,
    config: ControllerConfig,
    state: ProtocolState,
    decoder: FrameDecoder<N>,
    latch: TransmitLatch,
    link: LinkMonitor,
    stats: FrameStats,
}

impl<S, B, D, L, const N: usize> Controller<S, B, D, L, N>
where
    S: ByteSource,
    B: SpiBus,
    D: DelayUs,
    L: OutputPin,
{
    /// Create a controller after validating `config`
    pub fn new(
        source: S,
        bus: B,
        delay: D,
        led: L,
        config: ControllerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            source,
            bus,
            delay,
            led,
            config,
            state: ProtocolState::SeekingMagic,
            decoder: FrameDecoder::new(),
            latch: TransmitLatch::new(config.latch_ticks, config.tick_us),
            link: LinkMonitor::new(config.idle_timeout_ms),
            stats: FrameStats::default(),
        })
    }

    /// Run one loop iteration
    ///
    /// `now_ms` is a free-running millisecond clock used only for the
    /// idle timeout; it may wrap.
    pub fn poll(&mut self, now_ms: u32) -> Poll {
        let outcome = if self.state.accepts_input() {
            match self.source.poll_byte() {
                Some(Ok(byte)) => {
                    self.led.set_high();
                    self.link.byte_received(now_ms);
                    self.consume(byte)
                }
                Some(Err(_)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Host link read error");
                    self.stats.record_read_error();
                    Poll::ReadError
                }
                None => self.check_link(now_ms),
            }
        } else {
            self.settle_tick()
        };

        self.led.set_low();
        outcome
    }

    /// Feed one byte through the decoder
    fn consume(&mut self, byte: u8) -> Poll {
        match self.decoder.feed(byte) {
            Ok(Decoded::Scanning | Decoded::HeaderByte | Decoded::PayloadByte) => Poll::Consumed,
            Ok(Decoded::MarkerMatched) => {
                self.apply(Event::MarkerMatched);
                Poll::Synchronized
            }
            Ok(Decoded::HeaderAccepted(header)) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Frame header: {} LEDs", header.led_count());
                self.apply(Event::HeaderAccepted);
                Poll::HeaderAccepted(header)
            }
            Ok(Decoded::PayloadComplete) => {
                self.apply(Event::PayloadComplete);
                let bytes = self.drain();
                self.settle_tick();
                Poll::Drained { bytes }
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Frame rejected: {}", e);
                match e {
                    FrameError::InvalidChecksum { .. } => {
                        self.stats.record_checksum_error();
                        self.apply(Event::HeaderRejected);
                    }
                    FrameError::Oversized { .. } => {
                        self.stats.record_oversized();
                        self.apply(Event::FrameOversized);
                    }
                    _ => {}
                }
                Poll::Rejected(e)
            }
        }
    }

    /// Shift the held payload out to the strip
    fn drain(&mut self) -> usize {
        let payload = self.decoder.payload().unwrap_or(&[]);
        let report = self.latch.drain(&mut self.bus, payload);
        self.stats.record_drain(report.written, report.errors);

        #[cfg(feature = "defmt")]
        if report.errors > 0 {
            defmt::warn!("Strip write errors: {}", report.errors);
        }

        report.written
    }

    /// Wait one settle tick, releasing the frame when the window is over
    fn settle_tick(&mut self) -> Poll {
        match self.latch.tick(&mut self.delay) {
            Settle::Waiting { tick } => Poll::Settling { tick },
            Settle::Done => {
                self.decoder.release();
                self.link.clear();
                self.stats.record_latched();
                self.apply(Event::SettleComplete);
                Poll::Latched
            }
        }
    }

    /// Abandon a partial frame whose bytes stopped arriving
    fn check_link(&mut self, now_ms: u32) -> Poll {
        if !self.state.is_mid_frame() || !self.link.is_stalled(now_ms) {
            return Poll::Idle;
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Link stalled in {} after {}/{} payload bytes",
            self.state,
            self.decoder.received(),
            self.decoder.expected_len()
        );

        self.decoder.reset();
        self.link.clear();
        self.stats.record_stall();
        self.apply(Event::LinkStalled);
        Poll::Stalled
    }

    fn apply(&mut self, event: Event) {
        let next = self.state.transition(event);

        #[cfg(feature = "defmt")]
        if next != self.state {
            defmt::trace!("{} -> {} on {}", self.state, next, event);
        }

        self.state = next;
        debug_assert_eq!(self.state, ProtocolState::from(self.decoder.phase()));
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Settle ticks elapsed in the current latch window
    pub fn latch_ticks(&self) -> u8 {
        self.latch.ticks()
    }

    pub fn decoder(&self) -> &FrameDecoder<N> {
        &self.decoder
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    /// Give the collaborators back
    pub fn into_parts(self) -> (S, B, D, L) {
        (self.source, self.bus, self.delay, self.led)
    }
}
