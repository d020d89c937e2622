//! Dataset loading: extension dispatch to the CSV, spreadsheet, JSON and
//! plain-text readers, plus the table model they produce.

pub mod csv_reader;
pub mod json_reader;
pub mod loader;
pub mod spreadsheet;
pub mod summary;
pub mod table;

pub use loader::{load, DatasetFormat, LoadError};
pub use summary::{summarize, DatasetSummary};
pub use table::{CellValue, Column, ColumnType, Dataset, Table};
