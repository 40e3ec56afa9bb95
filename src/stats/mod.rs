//! Contributor statistics
//!
//! Folds attribution records into per-contributor accumulators. Commit and
//! file counts are set cardinalities, so crediting the same commit or file to
//! a contributor twice never inflates them; line totals always add up.

pub mod ranking;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::scanner::record::{AttributionRecord, IdentityPolicy};

pub use ranking::{rank, OrderBy};

/// Running totals for one contributor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorAccumulator {
    pub identity: String,
    pub total_lines: usize,
    pub commit_ids: HashSet<String>,
    pub file_paths: HashSet<String>,
}

impl ContributorAccumulator {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    /// Credit one record found in `file_path`
    pub fn add(&mut self, record: &AttributionRecord, file_path: &str) {
        self.total_lines += record.line_count;
        if !self.commit_ids.contains(&record.commit_id) {
            self.commit_ids.insert(record.commit_id.clone());
        }
        if !self.file_paths.contains(file_path) {
            self.file_paths.insert(file_path.to_string());
        }
    }

    /// Combine with another accumulator for the same identity
    pub fn merge(&mut self, other: ContributorAccumulator) {
        self.total_lines += other.total_lines;
        self.commit_ids.extend(other.commit_ids);
        self.file_paths.extend(other.file_paths);
    }

    pub fn snapshot(&self) -> ContributorStatistics {
        ContributorStatistics {
            name: self.identity.clone(),
            lines: self.total_lines,
            commits: self.commit_ids.len(),
            files: self.file_paths.len(),
        }
    }
}

/// Immutable per-contributor totals, as reported
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributorStatistics {
    pub name: String,
    pub lines: usize,
    pub commits: usize,
    pub files: usize,
}

/// Identity to accumulator map for one run
#[derive(Debug, Clone)]
pub struct Aggregator {
    identity: IdentityPolicy,
    contributors: HashMap<String, ContributorAccumulator>,
}

impl Aggregator {
    pub fn new(identity: IdentityPolicy) -> Self {
        Self {
            identity,
            contributors: HashMap::new(),
        }
    }

    /// Credit `record` to its contributor; records without an identity are dropped
    pub fn fold(&mut self, record: &AttributionRecord, file_path: &str) {
        let name = record.identity(self.identity);
        if name.is_empty() {
            return;
        }
        self.contributors
            .entry(name.to_string())
            .or_insert_with(|| ContributorAccumulator::new(name))
            .add(record, file_path);
    }

    /// Fold every record produced for one file
    pub fn fold_batch<'a, I>(&mut self, file_path: &str, records: I)
    where
        I: IntoIterator<Item = &'a AttributionRecord>,
    {
        for record in records {
            self.fold(record, file_path);
        }
    }

    /// Merge a partial aggregator built under the same identity policy
    pub fn merge(&mut self, other: Aggregator) {
        for (name, accumulator) in other.contributors {
            match self.contributors.get_mut(&name) {
                Some(existing) => existing.merge(accumulator),
                None => {
                    self.contributors.insert(name, accumulator);
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ContributorAccumulator> {
        self.contributors.get(name)
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Snapshot every accumulator, in no particular order
    pub fn statistics(&self) -> Vec<ContributorStatistics> {
        self.contributors.values().map(ContributorAccumulator::snapshot).collect()
    }
}
