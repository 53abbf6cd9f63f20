//! Control loop task
//!
//! Owns the strip, the activity LED and the read side of the host pipe.
//! Each iteration handles one byte or one settle tick, then yields so the
//! USB tasks keep running.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Instant};

use adalink_core::config::ControllerConfig;
use adalink_core::DefaultController;
use adalink_hal_rp2040::{ActivityLed, BlockingDelay, PipeSource, StripSpi};

use crate::channels::RX_PIPE;

/// Strip output on SPI0
pub type StripBus = StripSpi<Spi<'static, SPI0, Blocking>>;

/// How often frame statistics are logged
const STATS_INTERVAL: Duration = Duration::from_secs(10);

/// Controller task - runs the protocol loop forever
#[embassy_executor::task]
pub async fn controller_task(bus: StripBus, led: Output<'static>, config: ControllerConfig) {
    info!("Controller task started");

    let source = PipeSource::new(&RX_PIPE);
    let mut controller = match DefaultController::new(
        source,
        bus,
        BlockingDelay::embassy(),
        ActivityLed::new(led),
        config,
    ) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Invalid controller config: {:?}", e);
            return;
        }
    };

    let config = controller.config();
    info!(
        "Settle window {} us, idle timeout {:?} ms",
        config.settle_us(),
        config.idle_timeout_ms
    );

    let mut last_report = Instant::now();
    let mut reported = *controller.stats();

    loop {
        let now = Instant::now();

        // Rejections, stalls and read errors are logged by the controller
        controller.poll(now.as_millis() as u32);

        if now.duration_since(last_report) >= STATS_INTERVAL {
            last_report = now;
            let stats = *controller.stats();
            if stats != reported {
                info!("Stats: {:?}", stats);
                reported = stats;
            }
        }

        yield_now().await;
    }
}
