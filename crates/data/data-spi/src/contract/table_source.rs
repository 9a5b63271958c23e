//! Table source trait definition.

use crate::error::Result;
use crate::model::Table;

/// Trait for anything that can produce an uploaded table.
///
/// Implementations own their input (a file path, an upload buffer) and
/// infer the declared cell type of every column while reading.
pub trait TableSource: Send + Sync {
    /// Human readable source name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Read the whole table.
    fn read_table(&self) -> Result<Table>;
}
