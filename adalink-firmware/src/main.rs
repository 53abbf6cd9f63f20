//! adalink - Adalight LED Bridge Firmware
//!
//! Turns an RP2040 board into an Adalight-compatible ambient lighting
//! controller: the host streams pixel frames over USB serial and the
//! firmware clocks them out to a WS2801-class strip on SPI0.
//!
//! Wiring (Raspberry Pi Pico):
//! - GPIO18: strip clock (SPI0 SCK)
//! - GPIO19: strip data (SPI0 TX)
//! - GPIO25: activity LED

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::spi::Spi;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use adalink_core::boot::BootAnimation;
use adalink_core::config::{BootAnimationConfig, ControllerConfig};
use adalink_hal::serial::{UsbConfig, USB_PACKET_SIZE};
use adalink_hal::spi::SpiConfig;
use adalink_hal_rp2040::{spi_config, BlockingDelay, StripSpi};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// USB descriptor and control buffers (must live forever)
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("adalink firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Activity LED stays lit through the boot animation
    let led = Output::new(p.PIN_25, Level::High);

    // Setup SPI0 for the strip (transmit only, no chip select)
    let spi_cfg = SpiConfig::default();
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config(&spi_cfg));
    let mut bus = StripSpi::new(spi);

    info!("SPI0 initialized at {} Hz", spi_cfg.frequency);

    // Boot animation runs before USB comes up so it cannot starve enumeration
    let boot = BootAnimationConfig::default();
    match boot.validate() {
        Ok(()) => {
            let animation = BootAnimation::new(boot);
            info!("Boot animation: {} steps", animation.total_steps());
            let mut delay = BlockingDelay::embassy();
            if let Err(e) = animation.play(&mut bus, &mut delay) {
                warn!("Boot animation aborted: {:?}", e);
            }
        }
        Err(e) => warn!("Boot animation skipped: {:?}", e),
    }

    // Setup USB CDC-ACM for the host link
    let usb_cfg = UsbConfig::default();
    let driver = Driver::new(p.USB, Irqs);

    let mut config = embassy_usb::Config::new(usb_cfg.vendor_id, usb_cfg.product_id);
    config.manufacturer = Some(usb_cfg.manufacturer);
    config.product = Some(usb_cfg.product);
    config.serial_number = Some(usb_cfg.serial_number);
    config.max_power = usb_cfg.max_power_ma;
    config.max_packet_size_0 = USB_PACKET_SIZE as u8;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [], // no Microsoft OS descriptors
        CONTROL_BUF.init([0; 64]),
    );

    let class = CdcAcmClass::new(
        &mut builder,
        CDC_STATE.init(State::new()),
        USB_PACKET_SIZE,
    );
    let (sender, receiver, control) = class.split_with_control();
    let usb = builder.build();

    info!(
        "USB initialized ({:04x}:{:04x})",
        usb_cfg.vendor_id, usb_cfg.product_id
    );

    // Spawn tasks
    spawner.spawn(tasks::usb_device_task(usb)).unwrap();
    spawner.spawn(tasks::usb_rx_task(receiver)).unwrap();
    spawner
        .spawn(tasks::usb_greeting_task(sender, control))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(bus, led, ControllerConfig::default()))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
