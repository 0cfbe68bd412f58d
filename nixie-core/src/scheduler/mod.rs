//! Display scheduling
//!
//! Boot scan, time display and the periodic cathode-poisoning sweep.

pub mod executor;
pub mod machine;

pub use executor::DisplayScheduler;
pub use machine::{Mode, ScanState, SweepState, SCAN_STEP_TICKS};
