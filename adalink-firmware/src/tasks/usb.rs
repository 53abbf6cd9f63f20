//! USB CDC-ACM transport
//!
//! The host opens the virtual serial port and streams frames. Packets are
//! copied into [`RX_PIPE`] as they arrive; when the pipe is full the receive
//! task waits and the endpoint NAKs further packets until the control loop
//! catches up.
//!
//! The class is split so the greeting has its own task: a host that opens
//! the port without reading cannot hold up the receive side.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{ControlChanged, Receiver, Sender};
use embassy_usb::driver::EndpointError;
use embassy_usb::UsbDevice;

use adalink_hal::serial::{PortEvent, PortSession, USB_PACKET_SIZE};
use adalink_protocol::GREETING;

use crate::channels::RX_PIPE;

/// USB driver for the RP2040 controller
pub type UsbDriver = Driver<'static, USB>;

/// USB device task - runs enumeration and control transfers
#[embassy_executor::task]
pub async fn usb_device_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// USB greeting task - sends the banner each time the host opens the port
#[embassy_executor::task]
pub async fn usb_greeting_task(
    mut sender: Sender<'static, UsbDriver>,
    control: ControlChanged<'static>,
) -> ! {
    let mut session = PortSession::new();

    loop {
        sender.wait_connection().await;

        match session.update(sender.dtr()) {
            Some(PortEvent::Opened) => {
                info!("Host opened port");
                if let Err(e) = sender.write_packet(GREETING).await {
                    warn!("Greeting not sent: {:?}", e);
                    session.reset();
                }
            }
            Some(PortEvent::Closed) => info!("Host closed port"),
            None => {}
        }

        control.control_changed().await;
    }
}

/// USB receive task - forwards host bytes to the control loop
#[embassy_executor::task]
pub async fn usb_rx_task(mut receiver: Receiver<'static, UsbDriver>) -> ! {
    info!("USB RX task started");

    let mut buf = [0u8; USB_PACKET_SIZE as usize];

    loop {
        receiver.wait_connection().await;
        info!("USB configured");

        loop {
            match receiver.read_packet(&mut buf).await {
                Ok(n) => {
                    trace!("RX: {} bytes", n);
                    RX_PIPE.write_all(&buf[..n]).await;
                }
                Err(EndpointError::Disabled) => {
                    info!("USB deconfigured");
                    break;
                }
                Err(EndpointError::BufferOverflow) => {
                    warn!("USB packet larger than {} bytes", USB_PACKET_SIZE);
                }
            }
        }
    }
}
