//! Validated, ready-to-match form of [super::LineRule].

use regex::Regex;

use super::{Annotation, Header, LineRule, RuleKind};
use crate::{error::ConfigError, table::Row};

/// What a matching rule does with its line.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// Enter the table region, with this row as the header.
    OpenTable(Row),
    /// Append a row to the table.
    Append(Row),
    /// Leave the table region.
    CloseTable,
}

#[derive(Debug)]
pub(crate) enum CompiledRule {
    Header {
        marker: char,
        required: Vec<String>,
    },
    NumberedRow {
        pattern: Regex,
    },
    Annotation {
        marker: String,
        width: usize,
        text_column: usize,
        tail_column: usize,
    },
    PrefixedRow {
        prefix: String,
    },
    BlankLine,
}

impl CompiledRule {
    pub fn new(index: usize, rule: &LineRule, delimiter: &str) -> Result<Self, ConfigError> {
        let kind = RuleKind::from(rule);
        Ok(match rule {
            LineRule::Header(Header { marker, required }) => CompiledRule::Header {
                marker: *marker,
                required: required.clone(),
            },
            LineRule::NumberedRow(_) => CompiledRule::NumberedRow {
                pattern: numbered_row_pattern(delimiter)
                    .map_err(|_| ConfigError::InvalidDelimiter { rule: index, kind })?,
            },
            LineRule::Annotation(annotation) => compile_annotation(index, kind, annotation)?,
            LineRule::PrefixedRow(prefixed) => {
                if prefixed.prefix.is_empty() {
                    return Err(ConfigError::EmptyPrefix { rule: index, kind });
                }
                CompiledRule::PrefixedRow {
                    prefix: prefixed.prefix.clone(),
                }
            }
            LineRule::BlankLine(_) => CompiledRule::BlankLine,
        })
    }

    /// Whether the rule may be tried at all in the current scan state.
    pub fn eligible(&self, inside_table: bool, header_captured: bool) -> bool {
        match self {
            CompiledRule::Header { .. } => !header_captured,
            _ => inside_table,
        }
    }

    /// Tries the rule against an already trimmed line.
    pub fn apply(&self, line: &str, delimiter: &str) -> Option<Outcome> {
        match self {
            CompiledRule::Header { marker, required } => {
                let is_header = line.starts_with(*marker)
                    && required.iter().all(|needle| line.contains(needle.as_str()));
                is_header.then(|| Outcome::OpenTable(Row::split(line, delimiter)))
            }
            CompiledRule::NumberedRow { pattern } => pattern
                .is_match(line)
                .then(|| Outcome::Append(Row::split(line, delimiter))),
            CompiledRule::Annotation {
                marker,
                width,
                text_column,
                tail_column,
            } => line.contains(marker.as_str()).then(|| {
                let mut row = Row(vec![String::new(); *width]);
                row[*text_column] = line.to_string();
                row[*tail_column] = tail_field(line, delimiter).to_string();
                Outcome::Append(row)
            }),
            CompiledRule::PrefixedRow { prefix } => line
                .starts_with(prefix.as_str())
                .then(|| Outcome::Append(Row::split(line, delimiter))),
            CompiledRule::BlankLine => line.is_empty().then_some(Outcome::CloseTable),
        }
    }
}

/// Leading digits, optional whitespace, then the delimiter.
/// Fails only when the delimiter makes the pattern exceed the regex size limit.
fn numbered_row_pattern(delimiter: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"^[0-9]+\s*{}", regex::escape(delimiter)))
}

fn compile_annotation(
    index: usize,
    kind: RuleKind,
    cfg: &Annotation,
) -> Result<CompiledRule, ConfigError> {
    if cfg.marker.is_empty() {
        return Err(ConfigError::EmptyMarker { rule: index, kind });
    }
    if cfg.width == 0 {
        return Err(ConfigError::ZeroWidth { rule: index, kind });
    }
    for column in [cfg.text_column, cfg.tail_column] {
        if column >= cfg.width {
            return Err(ConfigError::ColumnOutOfRange {
                rule: index,
                kind,
                column,
                width: cfg.width,
            });
        }
    }
    if cfg.text_column == cfg.tail_column {
        return Err(ConfigError::ColumnCollision {
            rule: index,
            kind,
            column: cfg.text_column,
        });
    }

    Ok(CompiledRule::Annotation {
        marker: cfg.marker.clone(),
        width: cfg.width,
        text_column: cfg.text_column,
        tail_column: cfg.tail_column,
    })
}

/// Text after the last delimiter, or the whole line when there is none.
fn tail_field<'a>(line: &'a str, delimiter: &str) -> &'a str {
    line.rsplit(delimiter).next().unwrap_or(line).trim()
}
