//! Display task
//!
//! Runs the scheduler every 10 ms and pushes each tick's digits to the tube
//! chain. A failed frame is logged and dropped; the next tick sends a fresh
//! one.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use nixie_core::config::TICK_INTERVAL_MS;
use nixie_core::display::TubeDisplay;
use nixie_core::frame::DigitSet;
use nixie_core::scheduler::DisplayScheduler;
use nixie_drivers::tube::ShiftRegisterChain;
use nixie_hal::embedded::{EhOutput, EhSpi};

use crate::channels::{HV_REQUEST, HV_STATE, TARGET_DIGITS, WALL_CLOCK};

/// SPI bus feeding the shift-register chain
pub type TubeSpi = EhSpi<Spi<'static, SPI1, Blocking>>;

/// Latch and high-voltage control lines
pub type ControlPin = EhOutput<Output<'static>>;

/// The tube display as wired on the board
pub type BoardDisplay = TubeDisplay<ShiftRegisterChain<TubeSpi, ControlPin, ControlPin>>;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut display: BoardDisplay, mut scheduler: DisplayScheduler) {
    info!("Display task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(digits) = TARGET_DIGITS.try_take() {
            scheduler.set_target_digits(digits);
        }
        if let Some(now_s) = WALL_CLOCK.try_take() {
            scheduler.observe_clock(now_s);
        }

        let digits = scheduler.tick();

        if display.high_voltage_enabled() {
            if let Err(e) = display.show(&digits) {
                warn!("Tube frame dropped: {}", e);
            }
        }

        if let Some(enabled) = HV_REQUEST.try_take() {
            apply_high_voltage(&mut display, enabled, &digits);
        }
    }
}

/// Switch the tube supply
///
/// The current digits go out before the supply comes up; the chain is
/// blanked once it is down.
fn apply_high_voltage(display: &mut BoardDisplay, enabled: bool, digits: &DigitSet) {
    if enabled == display.high_voltage_enabled() {
        return;
    }

    if enabled {
        if let Err(e) = display.show(digits) {
            warn!("Tube frame dropped: {}", e);
        }
        display.set_high_voltage(true);
    } else {
        display.set_high_voltage(false);
        if let Err(e) = display.clear() {
            warn!("Tube clear failed: {}", e);
        }
    }

    HV_STATE.store(enabled, Ordering::Relaxed);
    info!("High voltage {}", if enabled { "on" } else { "off" });
}
