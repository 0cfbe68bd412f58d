//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod display;
pub mod rtc;

pub use display::{display_task, BoardDisplay};
pub use rtc::{rtc_task, BoardRtc};
