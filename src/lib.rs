//! Line, commit and file attribution per contributor for a git revision

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod languages;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod stats;

pub use error::{FameError, FameResult};
