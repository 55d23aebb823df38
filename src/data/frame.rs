//! Column-labelled price table as handed over by a data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Possibly hierarchical column label, e.g. `["Close", "QQQ"]` from a
/// multi-symbol download or just `["Close"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnLabel(Vec<String>);

impl ColumnLabel {
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(levels.into_iter().map(Into::into).collect())
    }

    pub fn flat(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Whether any level names `field`. Case, spaces and underscores are
    /// ignored, so `Adj Close`, `adj_close` and `adjclose` are the same field.
    pub fn names_field(&self, field: &str) -> bool {
        let wanted = canonical(field);
        self.0.iter().any(|level| canonical(level) == wanted)
    }

    /// Like [`ColumnLabel::names_field`], but on a multi-level label the
    /// level equal to `ticker` is skipped, so `["Open", "LOW"]` does not
    /// name the `Low` field.
    pub fn names_field_for(&self, field: &str, ticker: &str) -> bool {
        if self.0.len() < 2 {
            return self.names_field(field);
        }
        let wanted = canonical(field);
        self.0
            .iter()
            .filter(|level| !level.eq_ignore_ascii_case(ticker))
            .any(|level| canonical(level) == wanted)
    }

    /// Whether any level equals `value`, ignoring ASCII case
    pub fn has_level(&self, value: &str) -> bool {
        self.0.iter().any(|level| level.eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Date-indexed table of optional numeric cells, stored column by column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    index: Vec<NaiveDate>,
    columns: Vec<ColumnLabel>,
    data: Vec<Vec<Option<f64>>>,
}

impl RawFrame {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append a column. Values are padded with `None` (or truncated) to the
    /// length of the index.
    pub fn push_column(&mut self, label: ColumnLabel, mut values: Vec<Option<f64>>) {
        values.resize(self.index.len(), None);
        self.columns.push(label);
        self.data.push(values);
    }

    pub fn with_column(mut self, label: ColumnLabel, values: Vec<Option<f64>>) -> Self {
        self.push_column(label, values);
        self
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[ColumnLabel] {
        &self.columns
    }

    pub fn column(&self, position: usize) -> Option<&[Option<f64>]> {
        self.data.get(position).map(Vec::as_slice)
    }
}
