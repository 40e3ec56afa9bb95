//! Language to file-extension lookup
//!
//! The table is a JSON array of `{ "name", "type", "extensions" }` entries.
//! A default table is compiled into the binary; the `languages-file`
//! configuration key points at a replacement.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{FameError, FameResult};
use crate::scanner::filters::normalize_extension;

const DEFAULT_TABLE: &str = include_str!("../configs/language_extensions.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Extensions collected for a set of requested language names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSelection {
    pub extensions: HashSet<String>,
    /// Requested names with no entry in the table, as given
    pub unknown: Vec<String>,
    /// True when at least one non-blank name was requested
    pub requested: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    definitions: Vec<LanguageDefinition>,
}

impl LanguageTable {
    pub fn from_definitions(definitions: Vec<LanguageDefinition>) -> Self {
        Self { definitions }
    }

    pub fn parse(content: &str) -> FameResult<Self> {
        let definitions: Vec<LanguageDefinition> = serde_json::from_str(content)
            .map_err(|e| FameError::configuration(format!("invalid language table: {e}")))?;
        Ok(Self::from_definitions(definitions))
    }

    /// The table compiled into the binary
    pub fn builtin() -> FameResult<Self> {
        Self::parse(DEFAULT_TABLE)
    }

    pub fn load_from_file(path: &Path) -> FameResult<Self> {
        debug!("Loading language table from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            FameError::configuration(format!("failed to read language table {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Load `path` when given, otherwise the built-in table
    pub fn load(path: Option<&Path>) -> FameResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Case-insensitive lookup by name
    #[cfg(test)]
    fn find(&self, name: &str) -> Option<&LanguageDefinition> {
        let wanted = name.trim().to_lowercase();
        self.definitions
            .iter()
            .find(|def| def.name.trim().to_lowercase() == wanted)
    }

    /// Collect the extensions of every requested language
    pub fn select(&self, names: &[String]) -> LanguageSelection {
        let mut selection = LanguageSelection::default();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            selection.requested = true;
            let wanted = name.to_lowercase();
            let mut found = false;
            for def in self.definitions.iter().filter(|d| d.name.trim().to_lowercase() == wanted) {
                found = true;
                selection
                    .extensions
                    .extend(def.extensions.iter().filter_map(|e| normalize_extension(e)));
            }
            if !found {
                selection.unknown.push(name.to_string());
            }
        }

        selection
    }
}

impl LanguageSelection {
    /// Log one warning per unknown language name
    pub fn warn_unknown(&self) {
        for name in &self.unknown {
            warn!("unknown language: {}", name);
        }
    }

    /// Extension set for the path filter; `None` when no language was requested
    pub fn into_filter_set(self) -> Option<HashSet<String>> {
        self.requested.then_some(self.extensions)
    }
}
