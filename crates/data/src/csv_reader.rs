//! CSV table source
//!
//! Reads comma-separated text with a header row into a [`Table`], inferring
//! the declared cell type of every column on the way in.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use data_spi::{CellType, Column, DataError, Result, Table, TableSource};

use crate::dates;

/// Cell contents treated as a missing value.
pub const NA_MARKERS: [&str; 13] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

#[derive(Debug, Clone)]
enum CsvInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// CSV input held either as a file path or as an in-memory upload.
#[derive(Debug, Clone)]
pub struct CsvSource {
    name: String,
    input: CsvInput,
}

impl CsvSource {
    /// Read from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            name: path.display().to_string(),
            input: CsvInput::Path(path.to_path_buf()),
        }
    }

    /// Read from an uploaded buffer. `name` is the client-side file name.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            input: CsvInput::Bytes(bytes.into()),
        }
    }
}

impl TableSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_table(&self) -> Result<Table> {
        let table = match &self.input {
            CsvInput::Path(path) => {
                let file = File::open(path).map_err(|e| DataError::Io {
                    source_name: self.name.clone(),
                    reason: e.to_string(),
                })?;
                read_csv(BufReader::new(file))?
            }
            CsvInput::Bytes(bytes) => read_csv(bytes.as_slice())?,
        };

        tracing::debug!(
            source = %self.name,
            rows = table.n_rows(),
            columns = table.n_columns(),
            "table read"
        );
        Ok(table)
    }
}

/// Read a CSV document with a header row.
///
/// Header names are trimmed. Rows with a different number of fields than
/// the header are an error.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(DataError::NoColumns);
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(|e| DataError::Csv(e.to_string()))?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(normalize_cell(field));
        }
    }

    let columns = headers
        .iter()
        .zip(cells)
        .map(|(name, cells)| {
            let cell_type = infer_cell_type(&cells);
            Column::new(name, cell_type, cells)
        })
        .collect();

    Table::new(columns)
}

fn normalize_cell(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if NA_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Declared type of a column from its present cells.
///
/// A column with no present cells is numeric, matching a column of nulls.
pub fn infer_cell_type(cells: &[Option<String>]) -> CellType {
    let present: Vec<&str> = cells.iter().filter_map(|c| c.as_deref()).collect();

    if present.is_empty() {
        return CellType::Float;
    }
    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        return CellType::Integer;
    }
    if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return CellType::Float;
    }
    if present
        .iter()
        .all(|c| c.eq_ignore_ascii_case("true") || c.eq_ignore_ascii_case("false"))
    {
        return CellType::Boolean;
    }
    if dates::all_parse(present.iter().copied()) {
        return CellType::DateTime;
    }
    CellType::Text
}
