//! Uploaded table with declared column types.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Declared type of a column, inferred once when the table is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    /// Every non-missing cell is an integer
    Integer,
    /// Every non-missing cell is a number (or the column is entirely missing)
    Float,
    /// Every non-missing cell is `true` or `false`
    Boolean,
    /// Text whose every non-missing cell is a timestamp
    DateTime,
    /// Anything else
    Text,
}

impl CellType {
    /// Role a column of this type can play when building a series.
    pub fn role(&self) -> ColumnRole {
        match self {
            CellType::DateTime | CellType::Text => ColumnRole::DateLike,
            CellType::Integer | CellType::Float => ColumnRole::Numeric,
            CellType::Boolean => ColumnRole::Other,
        }
    }
}

/// Role tag computed for every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Candidate timestamp axis
    DateLike,
    /// Candidate value axis
    Numeric,
    /// Neither
    Other,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnRole::DateLike => "date-like",
            ColumnRole::Numeric => "numeric",
            ColumnRole::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A named column of raw cells. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cell_type: CellType,
    pub cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cell_type: CellType, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cell_type,
            cells,
        }
    }

    /// Role derived from the declared cell type.
    pub fn role(&self) -> ColumnRole {
        self.cell_type.role()
    }

    /// Raw cell at `row`, `None` when missing or out of range.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|c| c.as_deref())
    }

    /// Numeric value at `row`, `None` when missing or not a number.
    pub fn numeric(&self, row: usize) -> Option<f64> {
        self.get(row).and_then(|c| c.trim().parse::<f64>().ok())
    }

    /// Number of non-missing cells.
    pub fn non_missing(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// First rows of a table, rendered as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// Rectangular dataset with named, typed columns.
///
/// Ephemeral: built per upload, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length and
    /// that names are unique and non-empty.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);

        let mut seen = HashSet::new();
        for (index, column) in columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(DataError::EmptyHeader { index });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(DataError::DuplicateHeader(column.name.clone()));
            }
            if column.cells.len() != n_rows {
                return Err(DataError::InvalidTable(format!(
                    "column '{}' has {} cells, expected {}",
                    column.name,
                    column.cells.len(),
                    n_rows
                )));
            }
        }

        Ok(Self { columns, n_rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// First `rows` rows. Missing cells render as `NaN`.
    pub fn preview(&self, rows: usize) -> Preview {
        let shown = rows.min(self.n_rows);
        let rows = (0..shown)
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| c.get(r).unwrap_or("NaN").to_string())
                    .collect()
            })
            .collect();

        Preview {
            headers: self.columns.iter().map(|c| c.name.clone()).collect(),
            rows,
            total_rows: self.n_rows,
        }
    }
}
