//! End-to-end run: filter, scan, rank, present

use log::{debug, info};
use std::io::Write;

use crate::error::FameResult;
use crate::git::{GitRepository, RepositorySource};
use crate::languages::LanguageTable;
use crate::output::write_report;
use crate::scanner::{FameScanner, PathFilter};
use crate::stats::{rank, ContributorStatistics};

use super::RunOptions;

/// Build the path filter for a run, warning about unknown languages
pub fn build_path_filter(options: &RunOptions) -> FameResult<PathFilter> {
    let table = LanguageTable::load(options.languages_file.as_deref())?;
    debug!("Language table holds {} definitions", table.len());

    let selection = table.select(&options.languages);
    selection.warn_unknown();

    PathFilter::new(
        &options.extensions,
        selection.into_filter_set(),
        &options.restrict_to,
        &options.exclude,
    )
}

/// Ranked statistics for any repository source
pub fn rank_source<S: RepositorySource + ?Sized>(
    source: &S,
    filter: &PathFilter,
    options: &RunOptions,
) -> FameResult<Vec<ContributorStatistics>> {
    let outcome = FameScanner::new(source, filter, options.identity).scan()?;
    info!(
        "{} contributor(s) ranked by {}",
        outcome.aggregator.len(),
        options.order_by
    );
    Ok(rank(outcome.aggregator.statistics(), options.order_by))
}

/// Ranked statistics for the repository named in `options`
pub fn compute_rankings(options: &RunOptions) -> FameResult<Vec<ContributorStatistics>> {
    let filter = build_path_filter(options)?;
    let repository = GitRepository::open(&options.repository, &options.revision)?;
    rank_source(&repository, &filter, options)
}

/// Run the whole pipeline and write the report to `out`
///
/// Nothing is written unless every file was attributed.
pub fn run_fame<W: Write>(options: &RunOptions, out: &mut W) -> FameResult<()> {
    let ranked = compute_rankings(options)?;
    write_report(&ranked, options.format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FameError;
    use crate::git::HistoryEntry;
    use crate::output::OutputFormat;
    use crate::stats::OrderBy;
    use std::collections::HashMap;

    struct FixedSource {
        blame: HashMap<&'static str, String>,
    }

    impl RepositorySource for FixedSource {
        fn list_tracked_files(&self) -> FameResult<Vec<String>> {
            let mut files: Vec<String> = self.blame.keys().map(|k| k.to_string()).collect();
            files.sort();
            Ok(files)
        }

        fn read_file_content(&self, _path: &str) -> FameResult<Vec<u8>> {
            Ok(b"x\n".to_vec())
        }

        fn most_recent_history_entry(&self, _path: &str) -> FameResult<Option<HistoryEntry>> {
            Ok(None)
        }

        fn line_attribution(&self, path: &str) -> FameResult<String> {
            self.blame
                .get(path)
                .cloned()
                .ok_or_else(|| FameError::collaborator("git blame", path, "no such path"))
        }
    }

    fn block(hash_digit: char, author: &str, lines: usize) -> String {
        let hash: String = std::iter::repeat(hash_digit).take(40).collect();
        let mut text = format!("{hash} 1 1 {lines}\nauthor {author}\ncommitter {author}\n");
        for _ in 0..lines {
            text.push_str("\tcode\n");
        }
        text
    }

    fn source() -> FixedSource {
        let mut blame = HashMap::new();
        blame.insert("main.go", block('1', "Alice", 3) + &block('2', "Bob", 2));
        blame.insert("README.md", block('3', "Bob", 4));
        FixedSource { blame }
    }

    #[test]
    fn test_rank_source_orders_by_lines() {
        let options = RunOptions::new(".");
        let ranked = rank_source(&source(), &PathFilter::accept_all(), &options).unwrap();

        assert_eq!(ranked[0].name, "Bob");
        assert_eq!((ranked[0].lines, ranked[0].commits, ranked[0].files), (6, 2, 2));
        assert_eq!(ranked[1].name, "Alice");
    }

    #[test]
    fn test_unknown_language_rejects_everything() {
        let options = RunOptions {
            languages: vec!["Klingon".to_string()],
            ..RunOptions::new(".")
        };
        let filter = build_path_filter(&options).unwrap();
        let ranked = rank_source(&source(), &filter, &options).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_language_selection_keeps_matching_files() {
        let options = RunOptions {
            languages: vec!["go".to_string()],
            order_by: OrderBy::Commits,
            ..RunOptions::new(".")
        };
        let filter = build_path_filter(&options).unwrap();
        let ranked = rank_source(&source(), &filter, &options).unwrap();

        let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_invalid_glob_is_a_configuration_error() {
        let options = RunOptions {
            exclude: vec!["[".to_string()],
            ..RunOptions::new(".")
        };
        assert!(build_path_filter(&options).unwrap_err().is_configuration());
    }

    #[test]
    fn test_run_fame_writes_nothing_when_repository_is_missing() {
        let options = RunOptions {
            format: OutputFormat::Json,
            ..RunOptions::new("/nonexistent/gitfame/repo")
        };
        let mut out = Vec::new();
        assert!(run_fame(&options, &mut out).is_err());
        assert!(out.is_empty());
    }
}
