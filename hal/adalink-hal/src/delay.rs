//! Blocking delay abstraction
//!
//! The latch settle window is a number of fixed-duration ticks. Each tick
//! is one call to [`DelayUs::delay_us`], so an implementation may busy-wait,
//! sleep on a timer or simply record the request (tests).

/// Fixed-duration blocking wait
pub trait DelayUs {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        T::delay_us(self, us)
    }

    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}
