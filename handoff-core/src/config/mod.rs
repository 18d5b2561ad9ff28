//! Configuration types
//!
//! Board-agnostic node configuration and the `node.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin, ParseError};
pub use types::*;
