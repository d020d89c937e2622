//! Excel workbook reader (`.xlsx`, `.xls`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};

use super::loader::LoadError;
use super::table::{CellValue, Table};

/// Read the first worksheet, using its first row as the header.
pub fn read_path(path: &Path) -> Result<Table, LoadError> {
    let spreadsheet_error = |source| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(spreadsheet_error)?,
        None => {
            return Err(LoadError::InvalidShape {
                path: path.to_path_buf(),
                reason: "workbook contains no worksheets".to_string(),
            })
        }
    };

    Ok(table_from_range(&range))
}

pub(crate) fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| match cell_value(cell) {
                CellValue::Null => format!("Unnamed: {index}"),
                value => value.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    let body = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Table::new(headers, body)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(value) => CellValue::Bool(*value),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::String(value) if value.trim().is_empty() => CellValue::Null,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::DateTime(_) => CellValue::DateTime(
            cell.as_datetime()
                .map(|datetime| datetime.to_string())
                .unwrap_or_else(|| cell.to_string()),
        ),
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::DateTime(value.clone()),
    }
}
