use serde::{Deserialize, Serialize};

/// A detected table: an ordered list of rows, the first of which is the header.
///
/// Tables produced by the built-in detector have a uniform row width. Tables
/// coming from other extractors are only expected to, so consumers that index
/// by column must tolerate short rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    /// The first row, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Number of columns, taken from the header row.
    pub fn column_count(&self) -> usize {
        self.header().map_or(0, |h| h.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One worksheet as handed to a [`crate::xlsx::WorkbookWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Column names to move to the front of every table, in order.
    pub priority: Vec<String>,
}

impl ConvertOptions {
    pub fn with_priority<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConvertOptions {
            priority: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a finished conversion produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub tables: usize,
    pub rows: usize,
    pub extractor: String,
    pub writer: String,
}
