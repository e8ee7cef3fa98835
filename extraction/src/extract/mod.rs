//! Line-oriented table extraction.
//!
//! Lines are scanned top to bottom through a two-state machine (outside or
//! inside the table region). For each line the configured rules are tried in
//! order and the first eligible match decides the outcome. Lines matching no
//! rule are dropped.

#[cfg(test)]
mod tests;

use crate::{
    error::ConfigError,
    rules::{CompiledRule, Outcome, RuleConfig, TitleRule},
    table::Table,
    title,
};

/// A validated rule set, ready to extract tables. Holds no per-extraction
/// state, so one instance can serve any number of concurrent extractions.
#[derive(Debug)]
pub struct Extractor {
    delimiter: String,
    rules: Vec<CompiledRule>,
    title: Option<TitleRule>,
}

/// Scan state, scoped to a single [Extractor::extract] call.
#[derive(Debug, Default)]
struct Scan {
    inside_table: bool,
    header_captured: bool,
}

impl Extractor {
    /// Validates `cfg` and builds an extractor from it.
    pub fn new(cfg: &RuleConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: cfg.compile()?,
            delimiter: cfg.delimiter.clone(),
            title: cfg.title.clone(),
        })
    }

    /// Extracts the table from `lines`. Leading and trailing whitespace of each
    /// line is ignored for matching, and is not kept in the output.
    pub fn extract<I, S>(&self, lines: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = Scan::default();
        let mut table = Table::default();
        let mut num_lines = 0usize;

        for line in lines {
            num_lines += 1;
            let line = line.as_ref().trim();

            let outcome = self
                .rules
                .iter()
                .filter(|rule| rule.eligible(scan.inside_table, scan.header_captured))
                .find_map(|rule| rule.apply(line, &self.delimiter));

            match outcome {
                Some(Outcome::OpenTable(header)) => {
                    scan.inside_table = true;
                    scan.header_captured = true;
                    table.push(header);
                }
                Some(Outcome::Append(row)) => table.push(row),
                Some(Outcome::CloseTable) => scan.inside_table = false,
                None => {}
            }
        }

        log::debug!(
            "extracted {} rows from {} lines (header found: {})",
            table.len(),
            num_lines,
            scan.header_captured,
        );

        table
    }

    /// Extracts the table from text, splitting it into lines first.
    pub fn extract_text(&self, text: &str) -> Table {
        self.extract(text.lines())
    }

    /// Finds the document title, if a title rule is configured and any line
    /// carries one.
    pub fn find_title<I, S>(&self, lines: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.title
            .as_ref()
            .and_then(|rule| title::find_title(rule, lines))
    }
}

/// Validates `cfg` and extracts the table from `lines` in one step.
pub fn extract<I, S>(lines: I, cfg: &RuleConfig) -> Result<Table, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Extractor::new(cfg)?.extract(lines))
}
