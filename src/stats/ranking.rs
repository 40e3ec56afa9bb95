//! Contributor ranking
//!
//! Orders statistics by a primary metric, then by the two remaining metrics in
//! a fixed order, all descending, and finally by name ascending. Names are
//! unique, so the order is total and never depends on map iteration order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::FameError;

use super::ContributorStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Lines,
    Commits,
    Files,
}

impl Metric {
    pub fn value(&self, stats: &ContributorStatistics) -> usize {
        match self {
            Metric::Lines => stats.lines,
            Metric::Commits => stats.commits,
            Metric::Files => stats.files,
        }
    }
}

/// Primary ranking key, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Lines,
    Commits,
    Files,
}

impl OrderBy {
    pub const VALID_VALUES: &'static str = "lines, commits, files";

    /// Primary metric followed by its tie-break chain
    pub fn key_chain(&self) -> [Metric; 3] {
        match self {
            OrderBy::Lines => [Metric::Lines, Metric::Commits, Metric::Files],
            OrderBy::Commits => [Metric::Commits, Metric::Lines, Metric::Files],
            OrderBy::Files => [Metric::Files, Metric::Lines, Metric::Commits],
        }
    }

    /// Ordering in which `a` sorts before `b` when it ranks higher
    pub fn compare(&self, a: &ContributorStatistics, b: &ContributorStatistics) -> Ordering {
        self.key_chain()
            .iter()
            .map(|metric| metric.value(b).cmp(&metric.value(a)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.name.cmp(&b.name))
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderBy::Lines => "lines",
            OrderBy::Commits => "commits",
            OrderBy::Files => "files",
        };
        write!(f, "{name}")
    }
}

impl FromStr for OrderBy {
    type Err = FameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(OrderBy::Lines),
            "commits" => Ok(OrderBy::Commits),
            "files" => Ok(OrderBy::Files),
            _ => Err(FameError::invalid_option("order-by", s, Self::VALID_VALUES)),
        }
    }
}

/// Sort statistics into ranked order
pub fn rank(mut stats: Vec<ContributorStatistics>, order: OrderBy) -> Vec<ContributorStatistics> {
    stats.sort_by(|a, b| order.compare(a, b));
    stats
}
