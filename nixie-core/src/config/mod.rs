//! Configuration types and the embedded config parser

mod parse;
mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
