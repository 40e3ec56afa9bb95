//! Command line surface

pub mod args;
pub mod enhanced_parser;

pub use args::{parse_args, validate_args, Args};
