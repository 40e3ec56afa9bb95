//! Path filtering
//!
//! Decides whether a tracked file takes part in attribution. Checks run in a
//! fixed order and stop at the first rejection:
//!
//! 1. restrict-to globs (a path must match at least one, when any are set)
//! 2. exclude globs (a path matching any is rejected)
//! 3. explicit extension allow-set
//! 4. language-derived extension allow-set (active once a language was requested)
//!
//! Globs match the full repository-relative path and `*` does not cross `/`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::ops::ControlFlow;

use crate::error::{FameError, FameResult};

/// Why a path was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotRestricted,
    Excluded,
    Extension,
    Language,
}

impl Rejection {
    pub fn describe(&self) -> &'static str {
        match self {
            Rejection::NotRestricted => "matches no restrict-to pattern",
            Rejection::Excluded => "matches an exclude pattern",
            Rejection::Extension => "extension not requested",
            Rejection::Language => "extension not in requested languages",
        }
    }
}

/// Normalise an extension to `.ext` lowercase form; blank input yields `None`
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() {
        return None;
    }
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}

/// Lowercase extension of the final path segment, including the dot
///
/// `src/lib.RS` gives `.rs`, `.gitignore` gives `.gitignore`, `Makefile` gives
/// an empty string.
pub fn path_extension(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => name[idx..].to_lowercase(),
        None => String::new(),
    }
}

fn build_glob_set(patterns: &[String], flag: &'static str) -> FameResult<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut added = 0;

    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| FameError::configuration(format!("invalid --{flag} pattern '{pattern}': {e}")))?;
        builder.add(glob);
        added += 1;
    }

    if added == 0 {
        return Ok(None);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| FameError::configuration(format!("invalid --{flag} patterns: {e}")))
}

/// Immutable filter built once per run
#[derive(Debug, Clone)]
pub struct PathFilter {
    restrict: Option<GlobSet>,
    exclude: Option<GlobSet>,
    extensions: HashSet<String>,
    language_extensions: Option<HashSet<String>>,
}

impl PathFilter {
    /// Build a filter
    ///
    /// `language_extensions` is `None` when no language was requested; an
    /// empty set means languages were requested but none contributed any
    /// extension, which rejects every path.
    pub fn new(
        extensions: &[String],
        language_extensions: Option<HashSet<String>>,
        restrict_to: &[String],
        exclude: &[String],
    ) -> FameResult<Self> {
        Ok(Self {
            restrict: build_glob_set(restrict_to, "restrict-to")?,
            exclude: build_glob_set(exclude, "exclude")?,
            extensions: extensions.iter().filter_map(|e| normalize_extension(e)).collect(),
            language_extensions: language_extensions
                .map(|set| set.iter().filter_map(|e| normalize_extension(e)).collect()),
        })
    }

    /// A filter that accepts every path
    pub fn accept_all() -> Self {
        Self {
            restrict: None,
            exclude: None,
            extensions: HashSet::new(),
            language_extensions: None,
        }
    }

    /// Run every check, breaking on the first rejection
    pub fn check(&self, path: &str) -> ControlFlow<Rejection> {
        if let Some(restrict) = &self.restrict {
            if !restrict.is_match(path) {
                return ControlFlow::Break(Rejection::NotRestricted);
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return ControlFlow::Break(Rejection::Excluded);
            }
        }

        let extension = path_extension(path);

        if !self.extensions.is_empty() && (extension.is_empty() || !self.extensions.contains(&extension)) {
            return ControlFlow::Break(Rejection::Extension);
        }

        if let Some(allowed) = &self.language_extensions {
            if extension.is_empty() || !allowed.contains(&extension) {
                return ControlFlow::Break(Rejection::Language);
            }
        }

        ControlFlow::Continue(())
    }

    #[cfg(test)]
    fn accepts(&self, path: &str) -> bool {
        self.check(path).is_continue()
    }
}
