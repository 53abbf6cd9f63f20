//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod usb;

pub use controller::{controller_task, StripBus};
pub use usb::{usb_device_task, usb_greeting_task, usb_rx_task, UsbDriver};
