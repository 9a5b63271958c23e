//! Contracts for table providers.

mod table_source;

pub use table_source::TableSource;
