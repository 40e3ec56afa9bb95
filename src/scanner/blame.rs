//! Line attribution parser
//!
//! Consumes the output of `git blame --line-porcelain` and folds it into
//! `AttributionRecord`s. Each output line is one of:
//!
//! - a header line opening a block: a 40 character commit id followed by
//!   line numbers (`<sha> <orig-line> <final-line> [<group-size>]`)
//! - a metadata line `key value` (only `author` and `committer` are kept)
//! - a content line starting with a tab, one per attributed source line
//!
//! A header is recognised only when the first whitespace delimited token is
//! exactly 40 lowercase hex characters and the line carries at least three
//! tokens.

use log::trace;

use super::record::{AttributionRecord, IdentityPolicy};

const HASH_LEN: usize = 40;
const MIN_HEADER_TOKENS: usize = 3;

/// True when `s` is a full lowercase hex commit id
pub fn is_commit_hash(s: &str) -> bool {
    s.len() == HASH_LEN && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Classification of a single porcelain output line
#[derive(Debug, PartialEq, Eq)]
enum PorcelainLine<'a> {
    Blank,
    Content,
    Header(&'a str),
    Metadata { key: &'a str, value: &'a str },
}

fn classify(line: &str) -> PorcelainLine<'_> {
    if line.is_empty() {
        return PorcelainLine::Blank;
    }
    if line.starts_with('\t') {
        return PorcelainLine::Content;
    }

    let mut tokens = line.split_whitespace();
    if let Some(first) = tokens.next() {
        if is_commit_hash(first) && tokens.count() + 1 >= MIN_HEADER_TOKENS {
            return PorcelainLine::Header(first);
        }
    }

    match line.split_once(' ') {
        Some((key, value)) => PorcelainLine::Metadata { key, value },
        None => PorcelainLine::Metadata { key: line, value: "" },
    }
}

/// The block currently being assembled
#[derive(Debug, Default)]
struct OpenBlock {
    hash: String,
    author: String,
    committer: String,
    lines: usize,
}

/// Streaming state machine over porcelain output
#[derive(Debug)]
pub struct BlameParser {
    identity: IdentityPolicy,
    block: OpenBlock,
    records: Vec<AttributionRecord>,
}

impl BlameParser {
    pub fn new(identity: IdentityPolicy) -> Self {
        Self {
            identity,
            block: OpenBlock::default(),
            records: Vec::new(),
        }
    }

    /// Feed one output line (without its trailing newline)
    pub fn feed_line(&mut self, line: &str) {
        match classify(line) {
            PorcelainLine::Blank => {}
            PorcelainLine::Content => self.block.lines += 1,
            PorcelainLine::Header(hash) => {
                if !self.block.hash.is_empty() {
                    self.flush();
                }
                self.block = OpenBlock {
                    hash: hash.to_string(),
                    ..OpenBlock::default()
                };
            }
            PorcelainLine::Metadata { key, value } => match key {
                "author" => self.block.author = value.to_string(),
                "committer" => self.block.committer = value.to_string(),
                _ => {}
            },
        }
    }

    /// Close any open block and return the records collected so far
    pub fn finish(mut self) -> Vec<AttributionRecord> {
        if !self.block.hash.is_empty() {
            self.flush();
        }
        self.records
    }

    fn flush(&mut self) {
        let block = std::mem::take(&mut self.block);
        if block.hash.is_empty() || block.lines == 0 {
            return;
        }
        if self.identity.select(&block.author, &block.committer).is_empty() {
            trace!("Dropping {} line(s) of {} with no {}", block.lines, block.hash, self.identity);
            return;
        }
        self.records.push(AttributionRecord {
            commit_id: block.hash,
            author_name: block.author,
            committer_name: block.committer,
            line_count: block.lines,
        });
    }
}

/// Parse a complete porcelain dump into attribution records
pub fn parse_line_porcelain(output: &str, identity: IdentityPolicy) -> Vec<AttributionRecord> {
    let mut parser = BlameParser::new(identity);
    for line in output.split('\n') {
        parser.feed_line(line);
    }
    parser.finish()
}
