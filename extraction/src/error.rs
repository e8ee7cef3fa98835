use crate::rules::RuleKind;

/// Problems in a [crate::RuleConfig]. `rule` fields are the 0-based position
/// of the offending rule in [crate::RuleConfig::rules].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,
    #[error("rule {rule} ({kind}): delimiter cannot be compiled into a row pattern")]
    InvalidDelimiter { rule: usize, kind: RuleKind },
    #[error("rule {rule} ({kind}): marker must not be empty")]
    EmptyMarker { rule: usize, kind: RuleKind },
    #[error("rule {rule} ({kind}): prefix must not be empty")]
    EmptyPrefix { rule: usize, kind: RuleKind },
    #[error("rule {rule} ({kind}): width must be at least 1")]
    ZeroWidth { rule: usize, kind: RuleKind },
    #[error("rule {rule} ({kind}): column {column} is outside a row of width {width}")]
    ColumnOutOfRange {
        rule: usize,
        kind: RuleKind,
        column: usize,
        width: usize,
    },
    #[error("rule {rule} ({kind}): text and tail both target column {column}")]
    ColumnCollision {
        rule: usize,
        kind: RuleKind,
        column: usize,
    },
    #[error("title rule bounds must not be empty")]
    EmptyTitleBound,
}
