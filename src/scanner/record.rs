//! Attribution records produced by the blame parser and the empty-file resolver

use std::fmt;
use std::str::FromStr;

use crate::error::FameError;

/// Which signature name a record is credited to
///
/// Chosen once per run and applied to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    #[default]
    Author,
    Committer,
}

impl IdentityPolicy {
    pub fn from_use_committer(use_committer: bool) -> Self {
        if use_committer {
            IdentityPolicy::Committer
        } else {
            IdentityPolicy::Author
        }
    }

    /// Pick the author or committer name according to the policy
    pub fn select<'a>(&self, author: &'a str, committer: &'a str) -> &'a str {
        match self {
            IdentityPolicy::Author => author,
            IdentityPolicy::Committer => committer,
        }
    }
}

impl fmt::Display for IdentityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityPolicy::Author => write!(f, "author"),
            IdentityPolicy::Committer => write!(f, "committer"),
        }
    }
}

impl FromStr for IdentityPolicy {
    type Err = FameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "author" => Ok(IdentityPolicy::Author),
            "committer" => Ok(IdentityPolicy::Committer),
            _ => Err(FameError::invalid_option("identity", s, "author, committer")),
        }
    }
}

/// One contiguous run of lines in one file traced to one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionRecord {
    pub commit_id: String,
    pub author_name: String,
    pub committer_name: String,
    pub line_count: usize,
}

impl AttributionRecord {
    pub fn new(
        commit_id: impl Into<String>,
        author_name: impl Into<String>,
        committer_name: impl Into<String>,
        line_count: usize,
    ) -> Self {
        Self {
            commit_id: commit_id.into(),
            author_name: author_name.into(),
            committer_name: committer_name.into(),
            line_count,
        }
    }

    /// The name this record is credited to under `policy`
    pub fn identity(&self, policy: IdentityPolicy) -> &str {
        policy.select(&self.author_name, &self.committer_name)
    }
}
