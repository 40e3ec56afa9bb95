//! Report writers for each output format

use prettytable::{format, Cell, Row, Table};
use std::io::Write;

use crate::error::FameResult;
use crate::stats::ContributorStatistics;

use super::REPORT_HEADERS;

fn report_row(stats: &ContributorStatistics) -> [String; 4] {
    [
        stats.name.clone(),
        stats.lines.to_string(),
        stats.commits.to_string(),
        stats.files.to_string(),
    ]
}

/// Format a borderless, left-aligned table with one space between columns
pub fn format_contributor_table(stats: &[ContributorStatistics]) -> String {
    let mut table = Table::new();
    table.set_format(format::FormatBuilder::new().padding(0, 1).build());

    table.add_row(Row::new(REPORT_HEADERS.iter().map(|h| Cell::new(h)).collect()));
    for entry in stats {
        table.add_row(Row::new(report_row(entry).iter().map(|c| Cell::new(c)).collect()));
    }

    let mut result = String::new();
    for line in table.to_string().lines() {
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

pub fn write_tabular<W: Write>(stats: &[ContributorStatistics], out: &mut W) -> FameResult<()> {
    out.write_all(format_contributor_table(stats).as_bytes())?;
    Ok(())
}

/// Quote a CSV field when it holds a delimiter, quote, line break or leading space
fn escape_csv_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.starts_with(|c: char| c.is_whitespace());
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_csv<W: Write>(stats: &[ContributorStatistics], out: &mut W) -> FameResult<()> {
    writeln!(out, "{}", REPORT_HEADERS.join(","))?;
    for entry in stats {
        let record: Vec<String> = report_row(entry).iter().map(|f| escape_csv_field(f)).collect();
        writeln!(out, "{}", record.join(","))?;
    }
    Ok(())
}

pub fn write_json<W: Write>(stats: &[ContributorStatistics], out: &mut W) -> FameResult<()> {
    serde_json::to_writer(&mut *out, stats)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_json_lines<W: Write>(stats: &[ContributorStatistics], out: &mut W) -> FameResult<()> {
    for entry in stats {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    }
    Ok(())
}
