//! Repository scanning
//!
//! Walks the tracked files of a revision in listing order. Each file that
//! passes the path filter is attributed in isolation (blame for files with
//! content, latest history entry for empty ones) and the resulting batch is
//! then folded into the aggregator. Any repository failure aborts the scan.

pub mod blame;
pub mod empty_file;
pub mod filters;
pub mod record;

use log::{debug, info, trace};
use std::ops::ControlFlow;

use crate::error::FameResult;
use crate::git::RepositorySource;
use crate::stats::Aggregator;

pub use blame::{parse_line_porcelain, BlameParser};
pub use empty_file::resolve_empty_file;
pub use filters::PathFilter;
pub use record::{AttributionRecord, IdentityPolicy};

/// Counts of what a scan looked at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_listed: usize,
    pub files_filtered: usize,
    pub files_blamed: usize,
    pub empty_files: usize,
}

impl ScanSummary {
    pub fn to_compact_format(&self) -> String {
        format!(
            "Files: {} | Filtered: {} | Blamed: {} | Empty: {}",
            self.files_listed, self.files_filtered, self.files_blamed, self.empty_files
        )
    }
}

/// Result of a complete scan
#[derive(Debug)]
pub struct ScanOutcome {
    pub aggregator: Aggregator,
    pub summary: ScanSummary,
}

/// Attributes the files of one repository source
pub struct FameScanner<'a, S: RepositorySource + ?Sized> {
    source: &'a S,
    filter: &'a PathFilter,
    identity: IdentityPolicy,
}

impl<'a, S: RepositorySource + ?Sized> FameScanner<'a, S> {
    pub fn new(source: &'a S, filter: &'a PathFilter, identity: IdentityPolicy) -> Self {
        Self {
            source,
            filter,
            identity,
        }
    }

    /// Attribution records for a single file
    ///
    /// Returns the records and whether the file was empty.
    pub fn attribute_file(&self, path: &str) -> FameResult<(Vec<AttributionRecord>, bool)> {
        let content = self.source.read_file_content(path)?;

        if content.is_empty() {
            let entry = self.source.most_recent_history_entry(path)?;
            let records = resolve_empty_file(entry).into_iter().collect();
            return Ok((records, true));
        }

        let output = self.source.line_attribution(path)?;
        Ok((parse_line_porcelain(&output, self.identity), false))
    }

    pub fn scan(&self) -> FameResult<ScanOutcome> {
        let files = self.source.list_tracked_files()?;
        let mut aggregator = Aggregator::new(self.identity);
        let mut summary = ScanSummary {
            files_listed: files.len(),
            ..ScanSummary::default()
        };

        for path in &files {
            if let ControlFlow::Break(reason) = self.filter.check(path) {
                trace!("Skipping {}: {}", path, reason.describe());
                summary.files_filtered += 1;
                continue;
            }

            let (records, empty) = self.attribute_file(path)?;
            if empty {
                summary.empty_files += 1;
            } else {
                summary.files_blamed += 1;
            }
            debug!("{}: {} attribution record(s)", path, records.len());
            aggregator.fold_batch(path, &records);
        }

        info!("Scan complete: {}", summary.to_compact_format());
        Ok(ScanOutcome { aggregator, summary })
    }
}
