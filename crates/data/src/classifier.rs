//! Column classification
//!
//! Partitions a table's columns into candidate timestamp axes and candidate
//! value axes by their declared cell type. Pure inspection.

use serde::{Deserialize, Serialize};

use data_spi::{CellType, ColumnRole, DataError, Result, Table};

/// Declared type and role of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub cell_type: CellType,
    pub role: ColumnRole,
}

/// Result of classifying a table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Columns whose declared type is textual or datetime, in table order
    pub date_columns: Vec<String>,
    /// Columns whose declared type is integer or floating point, in table order
    pub numeric_columns: Vec<String>,
    /// Every column with its role
    pub columns: Vec<ColumnSummary>,
}

impl Classification {
    /// Date column preselected when the caller names none.
    pub fn default_date_column(&self) -> Option<&str> {
        self.date_columns.first().map(String::as_str)
    }

    /// Value column preselected when the caller names none.
    pub fn default_value_column(&self) -> Option<&str> {
        self.numeric_columns.first().map(String::as_str)
    }
}

/// Role of every column, without judging whether a series can be built.
pub fn describe_columns(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name.clone(),
            cell_type: c.cell_type,
            role: c.role(),
        })
        .collect()
}

/// Classify the columns of `table`.
///
/// Fails with [`DataError::MissingColumnKinds`] when there is no date-like
/// column or no numeric column.
pub fn classify(table: &Table) -> Result<Classification> {
    let columns = describe_columns(table);

    let names_with = |role: ColumnRole| -> Vec<String> {
        columns
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.name.clone())
            .collect()
    };
    let date_columns = names_with(ColumnRole::DateLike);
    let numeric_columns = names_with(ColumnRole::Numeric);

    if date_columns.is_empty() || numeric_columns.is_empty() {
        tracing::debug!(
            date_like = date_columns.len(),
            numeric = numeric_columns.len(),
            "table lacks a date-like or numeric column"
        );
        return Err(DataError::MissingColumnKinds {
            date_like: date_columns.len(),
            numeric: numeric_columns.len(),
        });
    }

    Ok(Classification {
        date_columns,
        numeric_columns,
        columns,
    })
}
