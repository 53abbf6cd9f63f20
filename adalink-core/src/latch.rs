//! Transmit and latch timing
//!
//! WS2801-class drivers latch their shift registers once the clock has been
//! idle for ~500 µs. After the payload is shifted out the loop must hold
//! off for that long before the next frame may start.

use adalink_hal::{DelayUs, SpiBus};

/// Result of draining a payload to the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Bytes accepted by the bus
    pub written: usize,
    /// Writes (including the final flush) that failed
    pub errors: usize,
}

/// Progress through the settle window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settle {
    /// More ticks to go; `tick` ticks done so far
    Waiting { tick: u8 },
    /// Window elapsed, counter reset
    Done,
}

/// Drains a frame to the strip and counts out the settle window
#[derive(Debug, Clone)]
pub struct TransmitLatch {
    ticks: u8,
    threshold: u8,
    tick_us: u32,
}

impl TransmitLatch {
    /// Create a latch of `threshold` ticks of `tick_us` each
    pub fn new(threshold: u8, tick_us: u32) -> Self {
        Self {
            ticks: 0,
            threshold: threshold.max(1),
            tick_us,
        }
    }

    /// Shift `payload` out one byte per write, in order
    ///
    /// A failed write is counted and the remaining bytes still go out. The
    /// lost byte shifts the rest of this frame one channel towards the
    /// start of the strip; the next frame is clocked out from pixel 0 again.
    pub fn drain<B: SpiBus>(&mut self, bus: &mut B, payload: &[u8]) -> DrainReport {
        self.ticks = 0;

        let mut report = DrainReport::default();
        for &byte in payload {
            match bus.write_byte(byte) {
                Ok(()) => report.written += 1,
                Err(_) => report.errors += 1,
            }
        }
        if bus.flush().is_err() {
            report.errors += 1;
        }
        report
    }

    /// Wait one tick and advance the counter
    pub fn tick<D: DelayUs>(&mut self, delay: &mut D) -> Settle {
        delay.delay_us(self.tick_us);
        self.ticks += 1;

        if self.ticks >= self.threshold {
            self.ticks = 0;
            Settle::Done
        } else {
            Settle::Waiting { tick: self.ticks }
        }
    }

    /// Ticks elapsed in the current window
    pub fn ticks(&self) -> u8 {
        self.ticks
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}
