//! In-memory collaborators for unit tests

use std::collections::VecDeque;

use adalink_hal::{ByteSource, DelayUs, OutputPin, SpiBus};

/// Host link fed from a queue
#[derive(Debug, Default)]
pub struct QueueSource {
    pub pending: VecDeque<u8>,
    pub reads: usize,
    /// Next read fails once
    pub fail_next: bool,
}

impl QueueSource {
    pub fn with_bytes(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }
}

impl ByteSource for QueueSource {
    type Error = ();

    fn is_ready(&mut self) -> bool {
        self.fail_next || !self.pending.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, ()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(());
        }
        self.reads += 1;
        self.pending.pop_front().ok_or(())
    }
}

/// Strip output that keeps every byte
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub bytes: Vec<u8>,
    pub writes: usize,
    pub flushes: usize,
}

impl SpiBus for RecordingBus {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        self.writes += 1;
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Strip output whose n-th write fails
#[derive(Debug, Default)]
pub struct FailingBus {
    pub inner: RecordingBus,
    fail_at: usize,
    attempts: usize,
}

impl FailingBus {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: index,
            ..Default::default()
        }
    }
}

impl SpiBus for FailingBus {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        let attempt = self.attempts;
        self.attempts += 1;
        if attempt == self.fail_at {
            return Err(());
        }
        self.inner.write(data)
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.inner.flush()
    }
}

/// Delay that records each request instead of waiting
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits: Vec<u32>,
}

impl DelayUs for RecordingDelay {
    fn delay_us(&mut self, us: u32) {
        self.waits.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms * 1_000);
    }
}

/// Activity LED that remembers how often it was lit
#[derive(Debug, Default)]
pub struct TestLed {
    pub level: bool,
    pub rises: usize,
}

impl OutputPin for TestLed {
    fn set_high(&mut self) {
        if !self.level {
            self.rises += 1;
        }
        self.level = true;
    }

    fn set_low(&mut self) {
        self.level = false;
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}
