//! Comma-separated reader.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::loader::LoadError;
use super::table::{CellValue, Table};

/// Field contents treated as missing values in addition to the empty string.
const NA_MARKERS: &[&str] = &[
    "NA", "N/A", "#N/A", "NaN", "nan", "null", "NULL", "None", "<NA>",
];

pub fn read_path(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse CSV content whose first record is the header row.
pub fn read<R: Read>(input: R) -> Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if header.is_empty() {
                format!("Unnamed: {index}")
            } else {
                header.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_field).collect());
    }

    Ok(Table::new(headers, rows))
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() || NA_MARKERS.contains(&field) {
        return CellValue::Null;
    }
    if let Ok(value) = field.parse::<i64>() {
        return CellValue::Int(value);
    }
    if let Ok(value) = field.parse::<f64>() {
        return CellValue::Float(value);
    }
    match field.to_ascii_lowercase().as_str() {
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => CellValue::Text(field.to_string()),
    }
}
