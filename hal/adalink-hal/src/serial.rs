//! Host serial link abstractions
//!
//! The host side of the bridge is a byte stream (USB CDC-ACM on the
//! reference board). The core polls it once per loop iteration and never
//! blocks waiting for data.

/// Polled inbound byte stream
///
/// Implementations expose bytes that the transport has already buffered.
/// `is_ready` must not block; `read_byte` is only called after `is_ready`
/// returned true.
pub trait ByteSource {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one byte can be read without blocking
    fn is_ready(&mut self) -> bool;

    /// Read a single buffered byte
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read one byte if one is buffered
    ///
    /// Returns `None` when nothing is available.
    fn poll_byte(&mut self) -> Option<Result<u8, Self::Error>> {
        if self.is_ready() {
            Some(self.read_byte())
        } else {
            None
        }
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    type Error = T::Error;

    fn is_ready(&mut self) -> bool {
        T::is_ready(self)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }
}

/// Full-speed bulk and control endpoint packet size in bytes
pub const USB_PACKET_SIZE: u16 = 64;

/// Host port transition reported by [`PortSession::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortEvent {
    /// Host program opened the port (DTR asserted)
    Opened,
    /// Host program closed the port (DTR dropped)
    Closed,
}

/// Tracks whether a host program holds the serial port open
///
/// USB configuration happens once per plug-in, but terminal programs open
/// and close the port many times. CDC-ACM hosts raise DTR on open and drop
/// it on close, so the open/close edges come from the DTR line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortSession {
    open: bool,
}

impl PortSession {
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Feed the current DTR level, returning the edge if it changed
    pub fn update(&mut self, dtr: bool) -> Option<PortEvent> {
        let event = match (self.open, dtr) {
            (false, true) => Some(PortEvent::Opened),
            (true, false) => Some(PortEvent::Closed),
            _ => None,
        };
        self.open = dtr;
        event
    }

    /// Forget the port state after the device left the configured state
    pub fn reset(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// USB serial device identity
#[derive(Debug, Clone, Copy)]
pub struct UsbConfig {
    /// USB vendor ID
    pub vendor_id: u16,
    /// USB product ID
    pub product_id: u16,
    /// Manufacturer string descriptor
    pub manufacturer: &'static str,
    /// Product string descriptor
    pub product: &'static str,
    /// Serial number string descriptor
    pub serial_number: &'static str,
    /// Maximum bus current in mA
    pub max_power_ma: u16,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            // pid.codes test VID/PID
            vendor_id: 0x1209,
            product_id: 0x0001,
            manufacturer: "adalink",
            product: "Adalight LED bridge",
            serial_number: "00000001",
            max_power_ma: 100,
        }
    }
}
