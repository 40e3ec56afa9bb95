//! Repository path resolution and validation

use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

/// Resolve the `--repository` argument to an existing directory
pub fn resolve_repository_path(repository_arg: &str) -> Result<PathBuf> {
    let path = expand_tilde(repository_arg);
    debug!("Repository path provided: {}", path.display());

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    path.canonicalize()
        .with_context(|| format!("Failed to resolve canonical path for: {}", path.display()))
}
