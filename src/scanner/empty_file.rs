//! Attribution for files without content
//!
//! Blame has nothing to say about a zero-byte file, so it is credited to the
//! last commit that touched it. The record carries no lines but still counts
//! towards its contributor's commits and files.

use crate::git::HistoryEntry;

use super::record::AttributionRecord;

/// Derive the synthetic record for an empty file from its latest history entry
pub fn resolve_empty_file(entry: Option<HistoryEntry>) -> Option<AttributionRecord> {
    let entry = entry?;
    if entry.hash.is_empty() {
        return None;
    }
    Some(AttributionRecord {
        commit_id: entry.hash,
        author_name: entry.author_name,
        committer_name: entry.committer_name,
        line_count: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_record_has_no_lines() {
        let entry = HistoryEntry {
            hash: "3".repeat(40),
            author_name: "Carol".to_string(),
            committer_name: "Dave".to_string(),
        };
        let record = resolve_empty_file(Some(entry)).unwrap();
        assert_eq!(record, AttributionRecord::new("3".repeat(40), "Carol", "Dave", 0));
    }

    #[test]
    fn test_no_history_contributes_nothing() {
        assert!(resolve_empty_file(None).is_none());

        let entry = HistoryEntry {
            hash: String::new(),
            author_name: "Carol".to_string(),
            committer_name: "Carol".to_string(),
        };
        assert!(resolve_empty_file(Some(entry)).is_none());
    }
}
