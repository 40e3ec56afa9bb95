//! Application orchestration module

pub mod execution;
pub mod initialization;
pub mod repository;

pub use execution::{compute_rankings, run_fame};
pub use initialization::{build_run_options, configure_logging, load_configuration, RunOptions};
pub use repository::resolve_repository_path;
