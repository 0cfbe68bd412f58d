//! Display modes
//!
//! What the tubes show is a function of the current mode and its own small
//! state. Each mode only carries the fields it needs.

use crate::frame::{Digit, DigitSet, TUBE_COUNT};

/// Ticks the boot scan dwells on each position
pub const SCAN_STEP_TICKS: u32 = 10;

/// Digit lit by the boot scan
const SCAN_DIGIT: Digit = Digit::units(1);

const LAST_POSITION: u8 = (TUBE_COUNT - 1) as u8;

/// Boot scan cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanState {
    /// 0-based lit position
    pub position: u8,
    /// Moving towards position 6
    pub forward: bool,
    /// Ticks spent on the current position
    pub dwell: u32,
}

impl ScanState {
    pub const fn new() -> Self {
        Self {
            position: 0,
            forward: true,
            dwell: 0,
        }
    }

    /// Digits for the current position
    pub fn digits(&self) -> DigitSet {
        DigitSet::single(self.position as usize, SCAN_DIGIT)
    }

    /// Count one tick, stepping the cursor every [`SCAN_STEP_TICKS`]
    ///
    /// The cursor turns around on reaching either end.
    pub fn advance(&mut self) {
        self.dwell += 1;
        if self.dwell < SCAN_STEP_TICKS {
            return;
        }
        self.dwell = 0;

        if self.forward {
            self.position = (self.position + 1).min(LAST_POSITION);
        } else {
            self.position = self.position.saturating_sub(1);
        }

        if self.position == LAST_POSITION {
            self.forward = false;
        } else if self.position == 0 {
            self.forward = true;
        }
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cathode sweep cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepState {
    /// Wall time the sweep began, seconds
    pub started_s: u32,
    /// Digit shown at position 1; position `p` shows `cursor + p`
    pub cursor: u8,
    /// Ticks since the cursor last moved
    pub dwell: u32,
}

impl SweepState {
    pub const fn new(started_s: u32) -> Self {
        Self {
            started_s,
            cursor: 0,
            dwell: 0,
        }
    }

    /// Digits for the current cursor
    pub fn digits(&self) -> DigitSet {
        let mut digits = [Digit::BLANK; TUBE_COUNT];
        for (offset, slot) in digits.iter_mut().enumerate() {
            *slot = Digit::units(self.cursor + offset as u8);
        }
        DigitSet::new(digits)
    }

    /// Count one tick, moving the cursor every `advance_ticks`
    pub fn advance(&mut self, advance_ticks: u32) {
        self.dwell += 1;
        if self.dwell >= advance_ticks {
            self.dwell = 0;
            self.cursor = (self.cursor + 1) % 10;
        }
    }
}

/// Scheduler mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-on scan, until the first target digits arrive
    BootScan(ScanState),
    /// Showing the caller's digits
    Display,
    /// Cycling every cathode to prevent poisoning
    PoisonSweep(SweepState),
}

impl Mode {
    /// Check if a cathode sweep is running
    pub fn is_sweeping(&self) -> bool {
        matches!(self, Mode::PoisonSweep(_))
    }

    /// Check if the boot scan is still running
    pub fn is_boot_scan(&self) -> bool {
        matches!(self, Mode::BootScan(_))
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::BootScan(ScanState::new())
    }
}
