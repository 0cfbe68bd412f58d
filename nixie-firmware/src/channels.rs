//! Inter-task communication
//!
//! Static signals between the Embassy tasks. The display task owns the
//! scheduler and the tube chain; everything else reaches them through here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};

use nixie_core::frame::DigitSet;
use nixie_core::rtc::ClockSample;

/// Digits for the display (updated by the RTC task)
pub static TARGET_DIGITS: Signal<CriticalSectionRawMutex, DigitSet> = Signal::new();

/// Wall time in seconds since 2000-01-01 (updated by the RTC task)
pub static WALL_CLOCK: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// High-voltage on/off request for the display task
pub static HV_REQUEST: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Time to write to the RTC chip
pub static CLOCK_SYNC: Signal<CriticalSectionRawMutex, ClockSample> = Signal::new();

/// High-voltage state as last applied by the display task
pub static HV_STATE: AtomicBool = AtomicBool::new(false);

/// Ask the display task to switch the tube supply
///
/// Applied between two ticks.
pub fn set_high_voltage(enabled: bool) {
    HV_REQUEST.signal(enabled);
}

/// Tube supply state, as seen by the accessory bridge
pub fn high_voltage_enabled() -> bool {
    HV_STATE.load(Ordering::Relaxed)
}

/// Hand a time from an external source to the RTC task
#[allow(dead_code)] // Called by the accessory bridge
pub fn sync_clock(sample: ClockSample) {
    CLOCK_SYNC.signal(sample);
}
