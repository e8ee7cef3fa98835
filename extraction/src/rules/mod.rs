//! Declarative configuration of how lines are recognised as table rows.
//!
//! A [RuleConfig] is plain data, typically loaded from YAML. It is checked and
//! compiled into an [crate::Extractor] before any text is scanned, so a bad
//! configuration is reported once rather than per line.

mod compiled;

use serde::{Deserialize, Serialize};

pub(crate) use compiled::{CompiledRule, Outcome};

use crate::error::ConfigError;

/// Complete configuration of a table extraction.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Separates fields within header and data lines.
    pub delimiter: String,
    /// Line rules in priority order. The first eligible rule that matches a
    /// line decides what happens to it.
    pub rules: Vec<LineRule>,
    /// Optional capture of a document title from page headers.
    pub title: Option<TitleRule>,
}

impl Default for RuleConfig {
    /// Recognises event schedules laid out as
    /// `#Event, Entries, Heats, Est. Start, Actual Start`.
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            rules: vec![
                LineRule::Header(Header {
                    marker: '#',
                    required: ["Event", "Entries", "Heats", "Est. Start", "Actual Start"]
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }),
                LineRule::NumberedRow(NumberedRow {}),
                LineRule::Annotation(Annotation {
                    marker: "Scheduled Break:".into(),
                    width: 6,
                    text_column: 1,
                    tail_column: 4,
                }),
                LineRule::PrefixedRow(PrefixedRow {
                    prefix: "68".into(),
                }),
                LineRule::BlankLine(BlankLine {}),
            ],
            title: Some(TitleRule::default()),
        }
    }
}

impl RuleConfig {
    /// Checks the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<Vec<CompiledRule>, ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if let Some(title) = &self.title {
            title.validate()?;
        }

        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| CompiledRule::new(index, rule, &self.delimiter))
            .collect()
    }
}

/// Supported line recognition rules.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, strum_macros::EnumDiscriminants)]
#[strum_discriminants(name(RuleKind), derive(Hash, strum_macros::Display))]
pub enum LineRule {
    Header(Header),
    NumberedRow(NumberedRow),
    Annotation(Annotation),
    PrefixedRow(PrefixedRow),
    BlankLine(BlankLine),
}

/// Opens the table region and captures the header row. Fires at most once per
/// extraction.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    /// The trimmed line must start with this character.
    pub marker: char,
    /// The line must contain every one of these substrings.
    #[serde(default)]
    pub required: Vec<String>,
}

/// Captures a row whose line starts with digits followed by the delimiter.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NumberedRow {}

/// Maps a line containing `marker` onto the table's column layout: the whole
/// line goes in `text_column`, the text after the last delimiter goes in
/// `tail_column`, and every other column of the `width` columns is empty.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    pub marker: String,
    pub width: usize,
    pub text_column: usize,
    pub tail_column: usize,
}

/// Captures a row whose line starts with a literal prefix.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrefixedRow {
    pub prefix: String,
}

/// Closes the table region on an empty line.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BlankLine {}

/// Captures the text between `after` and `before` on a page header line, such
/// as `Session Report Spring Invitational Page 1`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TitleRule {
    pub after: String,
    pub before: String,
}

impl Default for TitleRule {
    fn default() -> Self {
        Self {
            after: "Session Report".into(),
            before: "Page".into(),
        }
    }
}

impl TitleRule {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.after.is_empty() || self.before.is_empty() {
            return Err(ConfigError::EmptyTitleBound);
        }
        Ok(())
    }
}
