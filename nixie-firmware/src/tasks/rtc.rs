//! RTC task
//!
//! Polls the clock chip and publishes the time to the display task once
//! per second change. Also writes times handed in through
//! [`crate::channels::CLOCK_SYNC`].

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use nixie_core::config::ClockConfig;
use nixie_core::rtc::Rtc;
use nixie_drivers::rtc::Ds3231;
use nixie_hal::embedded::EhI2c;

use crate::channels::{CLOCK_SYNC, TARGET_DIGITS, WALL_CLOCK};

/// The clock chip as wired on the board
pub type BoardRtc = Rtc<Ds3231<EhI2c<I2c<'static, I2C0, Blocking>>>>;

/// RTC task
#[embassy_executor::task]
pub async fn rtc_task(mut rtc: BoardRtc, config: ClockConfig) {
    info!("RTC task started");

    let mut ticker = Ticker::every(Duration::from_millis(config.poll_interval_ms as u64));
    let mut last_second: Option<u8> = None;

    loop {
        ticker.next().await;

        if let Some(sample) = CLOCK_SYNC.try_take() {
            match rtc.set_clock(&sample) {
                Ok(()) => {
                    info!(
                        "Clock set to {}:{}:{}",
                        sample.hour, sample.minute, sample.second
                    );
                    last_second = None;
                }
                Err(e) => warn!("Clock set failed: {}", e),
            }
        }

        let now = match rtc.sync() {
            Ok(now) => now,
            Err(e) => {
                warn!("RTC read failed: {}", e);
                continue;
            }
        };

        if last_second == Some(now.second) {
            continue;
        }
        last_second = Some(now.second);

        match now.digits(config.time_format) {
            Ok(digits) => TARGET_DIGITS.signal(digits),
            Err(e) => warn!("Time not displayable: {}", e),
        }
        match now.seconds_since_2000() {
            Ok(seconds) => WALL_CLOCK.signal(seconds),
            Err(field) => warn!("Impossible date from RTC ({})", field),
        }
        trace!("Time {}:{}:{}", now.hour, now.minute, now.second);
    }
}
