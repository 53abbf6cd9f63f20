//! Blocking delays
//!
//! Latch ticks are 100 µs, far below the executor's scheduling granularity,
//! so the control loop busy-waits instead of awaiting a timer.

use embedded_hal::delay::DelayNs;

/// Busy-wait delay over any `embedded-hal` delay provider
///
/// Wrap `embassy_time::Delay` to spin on the embassy time driver.
pub struct BlockingDelay<D> {
    inner: D,
}

impl<D: DelayNs> BlockingDelay<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl BlockingDelay<embassy_time::Delay> {
    /// Delay backed by the embassy time driver
    pub fn embassy() -> Self {
        Self::new(embassy_time::Delay)
    }
}

impl<D: DelayNs> adalink_hal::DelayUs for BlockingDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
