//! Encodes extracted tables for output.

use std::io::Write;

use anyhow::{Context, Result};
use extraction::Table;
use lazy_regex::regex_replace_all;
use serde::Serialize;

/// An extracted table together with what else was recovered from the document.
#[derive(Debug, Serialize)]
pub struct Document {
    pub title: Option<String>,
    #[serde(rename = "rows")]
    pub table: Table,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One CSV record per row. Only the table is written.
    #[default]
    Csv,
    /// A JSON object with the title and the rows.
    Json,
}

impl OutputFormat {
    pub fn write(self, doc: &Document, writer: impl Write) -> Result<()> {
        match self {
            OutputFormat::Csv => write_csv(&doc.table, writer),
            OutputFormat::Json => write_json(doc, writer),
        }
    }
}

/// Writes `table` as CSV. Rows are written as-is, whatever their length.
pub fn write_csv(table: &Table, writer: impl Write) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for (row_index, row) in table.iter().enumerate() {
        csv_writer
            .write_record(row.iter())
            .with_context(|| format!("writing row index {row_index}"))?;
    }

    // Check for error rather than implicitly flushing and ignoring.
    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Writes `doc` as pretty-printed JSON.
pub fn write_json(doc: &Document, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, doc).context("writing JSON output")?;
    writer.write_all(b"\n").context("writing JSON output")?;
    writer.flush().context("flushing JSON output")
}

/// Derives a filename stem from a document title, falling back to `output`.
pub fn file_stem(title: Option<&str>) -> String {
    let stem = title
        .map(|title| regex_replace_all!(r"[^A-Za-z0-9]+", title, "_"))
        .map(|stem| stem.trim_matches('_').to_string())
        .unwrap_or_default();

    if stem.is_empty() {
        "output".to_string()
    } else {
        stem
    }
}
