//! GPIO outputs

use embassy_rp::gpio::Output;

/// Activity LED driven high while a byte is being handled
pub struct ActivityLed<'d> {
    pin: Output<'d>,
}

impl<'d> ActivityLed<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl<'d> adalink_hal::OutputPin for ActivityLed<'d> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
