//! Report serialisation
//!
//! Renders ranked contributor statistics as an aligned table, CSV, a JSON
//! array or JSON lines. The caller owns the writer; reports go to stdout.

pub mod reports;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{FameError, FameResult};
use crate::stats::ContributorStatistics;

pub use reports::{format_contributor_table, write_csv, write_json, write_json_lines, write_tabular};

/// Column headings shared by the tabular and CSV formats
pub const REPORT_HEADERS: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

impl OutputFormat {
    pub const VALID_VALUES: &'static str = "tabular, csv, json, json-lines";
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Tabular => "tabular",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::JsonLines => "json-lines",
        };
        write!(f, "{name}")
    }
}

impl FromStr for OutputFormat {
    type Err = FameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular" => Ok(OutputFormat::Tabular),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "json-lines" => Ok(OutputFormat::JsonLines),
            _ => Err(FameError::invalid_option("format", s, Self::VALID_VALUES)),
        }
    }
}

/// Write `stats` to `out` in the requested format
pub fn write_report<W: Write>(stats: &[ContributorStatistics], format: OutputFormat, out: &mut W) -> FameResult<()> {
    match format {
        OutputFormat::Tabular => write_tabular(stats, out),
        OutputFormat::Csv => write_csv(stats, out),
        OutputFormat::Json => write_json(stats, out),
        OutputFormat::JsonLines => write_json_lines(stats, out),
    }?;
    out.flush()?;
    Ok(())
}
