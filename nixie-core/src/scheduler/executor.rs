//! Display scheduler
//!
//! Decides what the tubes show on every 10 ms tick: the boot scan until the
//! first digits arrive, then the caller's digits, interrupted periodically
//! by a cathode-poisoning sweep. Sweep timing runs on wall-clock seconds
//! supplied through [`DisplayScheduler::observe_clock`]; the tick counter
//! only paces the animations.
//!
//! The scheduler never touches hardware. Rendering the returned digits is
//! up to [`crate::display::TubeDisplay`], so a failed transmit cannot
//! disturb the timers here.

use super::machine::{Mode, SweepState};
use crate::config::{ConfigError, SweepConfig};
use crate::frame::{DigitError, DigitSet, TUBE_COUNT};

/// Display scheduler
#[derive(Debug, Clone)]
pub struct DisplayScheduler {
    mode: Mode,
    target: DigitSet,
    config: SweepConfig,
    /// Ticks since creation, wrapping
    ticks: u32,
    /// Latest wall time, seconds
    now_s: Option<u32>,
    /// Start of the last sweep; `None` until the first display tick with a
    /// known wall time arms it
    last_sweep_start_s: Option<u32>,
}

impl DisplayScheduler {
    /// Create a scheduler in boot-scan mode
    pub fn new(config: SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a scheduler with the default sweep timing
    pub fn with_defaults() -> Self {
        Self::with_config(SweepConfig::default())
    }

    /// `config` must already be validated
    fn with_config(config: SweepConfig) -> Self {
        Self {
            mode: Mode::default(),
            target: DigitSet::BLANK,
            config,
            ticks: 0,
            now_s: None,
            last_sweep_start_s: None,
        }
    }

    /// Set the digits to show
    ///
    /// Ends the boot scan. During a sweep the new digits are kept and shown
    /// once the sweep ends.
    pub fn set_target_digits(&mut self, digits: DigitSet) {
        self.target = digits;
        if self.mode.is_boot_scan() {
            self.mode = Mode::Display;
        }
    }

    /// Set the digits to show from the raw form, `-1` meaning blank
    ///
    /// On error the previous digits stay in place.
    pub fn set_target_raw(&mut self, raw: [i8; TUBE_COUNT]) -> Result<(), DigitError> {
        let digits = DigitSet::from_raw(raw)?;
        self.set_target_digits(digits);
        Ok(())
    }

    /// Record the current wall time in seconds
    ///
    /// Takes effect on the next tick. The value must be monotonic across
    /// midnight, such as [`crate::rtc::ClockSample::seconds_since_2000`].
    pub fn observe_clock(&mut self, now_s: u32) {
        self.now_s = Some(now_s);
    }

    /// Advance one tick and return the digits to show for it
    pub fn tick(&mut self) -> DigitSet {
        self.ticks = self.ticks.wrapping_add(1);
        self.update_sweep();

        match &mut self.mode {
            Mode::BootScan(scan) => {
                let digits = scan.digits();
                scan.advance();
                digits
            }
            Mode::Display => self.target,
            Mode::PoisonSweep(sweep) => {
                let digits = sweep.digits();
                sweep.advance(self.config.advance_ticks);
                digits
            }
        }
    }

    /// Start or end a sweep based on the latest wall time
    fn update_sweep(&mut self) {
        let Some(now) = self.now_s else {
            return;
        };

        match self.mode {
            Mode::BootScan(_) => {}
            Mode::Display => match self.last_sweep_start_s {
                None => self.last_sweep_start_s = Some(now),
                Some(last) => match now.checked_sub(last) {
                    Some(elapsed) if elapsed > self.config.interval_s => {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("Cathode sweep started at {}", now);
                        self.mode = Mode::PoisonSweep(SweepState::new(now));
                        self.last_sweep_start_s = Some(now);
                    }
                    Some(_) => {}
                    // Clock was set back: wait a full interval from here
                    None => self.last_sweep_start_s = Some(now),
                },
            },
            Mode::PoisonSweep(sweep) => match now.checked_sub(sweep.started_s) {
                Some(elapsed) if elapsed < self.config.duration_s => {}
                Some(_) => self.mode = Mode::Display,
                None => {
                    self.mode = Mode::Display;
                    self.last_sweep_start_s = Some(now);
                }
            },
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Digits the caller last set
    pub fn target(&self) -> DigitSet {
        self.target
    }

    /// Ticks since creation, wrapping
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Check if a cathode sweep is running
    pub fn is_sweeping(&self) -> bool {
        self.mode.is_sweeping()
    }

    /// Current sweep timing
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Change the seconds between sweep starts
    pub fn set_sweep_interval(&mut self, interval_s: u32) -> Result<(), ConfigError> {
        self.apply(SweepConfig {
            interval_s,
            ..self.config
        })
    }

    /// Change how long a sweep lasts
    pub fn set_sweep_duration(&mut self, duration_s: u32) -> Result<(), ConfigError> {
        self.apply(SweepConfig {
            duration_s,
            ..self.config
        })
    }

    /// Change the ticks per sweep cursor step
    pub fn set_advance_ticks(&mut self, advance_ticks: u32) -> Result<(), ConfigError> {
        self.apply(SweepConfig {
            advance_ticks,
            ..self.config
        })
    }

    fn apply(&mut self, config: SweepConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

impl Default for DisplayScheduler {
    fn default() -> Self {
        Self::with_defaults()
    }
}
