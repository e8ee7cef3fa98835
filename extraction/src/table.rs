use std::ops::{Deref, DerefMut};

use serde::Serialize;

/// Ordered rows recovered from a document. The first row is the header when
/// header recognition fired. Rows need not share a field count.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table(pub Vec<Row>);

impl Table {
    /// Returns the header row, if any row was captured.
    pub fn header(&self) -> Option<&Row> {
        self.0.first()
    }

    /// Returns the rows following the header.
    pub fn body(&self) -> &[Row] {
        self.0.get(1..).unwrap_or_default()
    }

    /// True if any two rows differ in field count.
    pub fn is_ragged(&self) -> bool {
        let mut lens = self.0.iter().map(|row| row.len());
        match lens.next() {
            Some(first) => lens.any(|len| len != first),
            None => false,
        }
    }
}

impl Deref for Table {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, R> From<C> for Table
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        Table(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(pub Vec<String>);

impl Row {
    /// Splits `line` on every occurrence of `delimiter`, trimming each field.
    ///
    /// There is no quoting: a field containing the delimiter is split.
    pub fn split(line: &str, delimiter: &str) -> Self {
        Row(line
            .split(delimiter)
            .map(|field| field.trim().to_string())
            .collect())
    }
}

impl Deref for Row {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(Into::into).collect())
    }
}
