//! Nixie - six-tube clock firmware
//!
//! Main firmware binary for RP2040-based clock boards. The tube chain sits
//! on SPI1, the RTC chip on I2C0; pin assignments follow the reference
//! board.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::{self, Spi};
use {defmt_rtt as _, panic_probe as _};

use nixie_core::config::{parse_config, NixieConfig};
use nixie_core::display::TubeDisplay;
use nixie_core::rtc::{ClockCodec, Rtc};
use nixie_core::scheduler::DisplayScheduler;
use nixie_drivers::rtc::Ds3231;
use nixie_drivers::tube::{HvGate, ShiftRegisterChain};
use nixie_hal::embedded::{EhI2c, EhOutput, EhSpi};
use nixie_hal::i2c::I2cConfig;
use nixie_hal::spi::{self as hal_spi, BitOrder, SpiConfig};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Tube chain: SPI1 CLK=GPIO10, MOSI=GPIO11; HV shutdown=GPIO12, latch=GPIO13.
    // The RP2040 SPI block only shifts MSB first; the driver mirrors each byte.
    let tube_spi = SpiConfig::TUBE_CHAIN.with_frequency(config.display.spi_frequency_hz);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, rp_spi_config(&tube_spi));

    let hv_pin = EhOutput::new(Output::new(p.PIN_12, Level::High), true);
    let latch_pin = EhOutput::new(Output::new(p.PIN_13, Level::Low), false);

    let chain = ShiftRegisterChain::new(
        EhSpi::new(spi),
        BitOrder::MsbFirst,
        latch_pin,
        HvGate::new_shutdown(hv_pin),
        config.display.variant,
    );
    let display = TubeDisplay::new(chain, config.display.variant);
    info!(
        "Tube chain on SPI1 at {} Hz, variant {}",
        tube_spi.frequency, config.display.variant
    );

    let scheduler = match DisplayScheduler::new(config.sweep) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            warn!("Sweep config rejected ({}), using defaults", e);
            DisplayScheduler::default()
        }
    };

    // RTC: I2C0 SDA=GPIO4, SCL=GPIO5
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::RTC.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let rtc = Rtc::new(
        Ds3231::new(EhI2c::new(i2c)),
        ClockCodec::new(config.clock.hour_mode),
    );
    info!("RTC on I2C0 at {} Hz", I2cConfig::RTC.frequency);

    spawner
        .spawn(tasks::display_task(display, scheduler))
        .unwrap();
    spawner.spawn(tasks::rtc_task(rtc, config.clock)).unwrap();

    if config.display.high_voltage_on_boot {
        channels::set_high_voltage(true);
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Main loop heartbeat, high voltage {}",
            channels::high_voltage_enabled()
        );
    }
}

/// Translate board SPI settings to the RP2040 driver's config
fn rp_spi_config(config: &SpiConfig) -> spi::Config {
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity {
        hal_spi::Polarity::IdleLow => spi::Polarity::IdleLow,
        hal_spi::Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match config.phase {
        hal_spi::Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        hal_spi::Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}

/// Parse the embedded configuration
///
/// build.rs already rejects a bad file, so the fallback only guards against
/// the two parsers disagreeing.
fn load_config() -> NixieConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            warn!("Embedded configuration rejected ({}), using defaults", e);
            NixieConfig::default()
        }
    }
}
