//! JSON reader accepting the common tabular layouts.
//!
//! - records: `[{"id": 1, "amount": 9.5}, ...]`
//! - columns: `{"id": [1, 2], "amount": [9.5, 3.0]}`
//! - indexed columns: `{"id": {"0": 1, "1": 2}, ...}`
//!
//! Column order follows the order keys are first seen in the document. Indexed
//! columns are aligned on their index keys, so a key missing from one column
//! leaves a missing value in that row.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::{Map, Value};

use super::loader::LoadError;
use super::table::{CellValue, Table};

pub fn read_path(path: &Path) -> Result<Table, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    table_from_value(document).map_err(|reason| LoadError::InvalidShape {
        path: path.to_path_buf(),
        reason,
    })
}

pub(crate) fn table_from_value(document: Value) -> Result<Table, String> {
    match document {
        Value::Array(records) => from_records(records),
        Value::Object(columns) => from_columns(columns),
        other => Err(format!(
            "expected an array of records or an object of columns, found {}",
            value_kind(&other)
        )),
    }
}

fn from_records(records: Vec<Value>) -> Result<Table, String> {
    let mut names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let object = match record {
            Value::Object(object) => object,
            other => {
                return Err(format!(
                    "record {index} is {} rather than an object",
                    value_kind(&other)
                ))
            }
        };
        for key in object.keys() {
            if !names.iter().any(|name| name == key) {
                names.push(key.clone());
            }
        }
        objects.push(object);
    }

    let rows = objects
        .iter()
        .map(|object| {
            names
                .iter()
                .map(|name| object.get(name).map(cell_value).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Table::new(names, rows))
}

fn from_columns(columns: Map<String, Value>) -> Result<Table, String> {
    let mut names = Vec::with_capacity(columns.len());
    let mut keyed_columns: Vec<HashMap<String, CellValue>> = Vec::with_capacity(columns.len());
    // Row labels in first-seen order; array positions label themselves "0", "1", ...
    let mut row_keys: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (name, column) in columns {
        let entries: Vec<(String, CellValue)> = match column {
            Value::Array(values) => values
                .iter()
                .enumerate()
                .map(|(position, value)| (position.to_string(), cell_value(value)))
                .collect(),
            Value::Object(indexed) => indexed
                .iter()
                .map(|(key, value)| (key.clone(), cell_value(value)))
                .collect(),
            other => {
                return Err(format!(
                    "column '{name}' is {} rather than an array or object",
                    value_kind(&other)
                ))
            }
        };

        for (key, _) in &entries {
            if seen.insert(key.clone()) {
                row_keys.push(key.clone());
            }
        }
        names.push(name);
        keyed_columns.push(entries.into_iter().collect());
    }

    let rows = row_keys
        .iter()
        .map(|key| {
            keyed_columns
                .iter()
                .map(|column| column.get(key).cloned().unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Table::new(names, rows))
}

fn cell_value(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(value) => CellValue::Bool(*value),
        Value::Number(number) => number
            .as_i64()
            .map(CellValue::Int)
            .or_else(|| number.as_f64().map(CellValue::Float))
            .unwrap_or_else(|| CellValue::Text(number.to_string())),
        Value::String(text) => CellValue::Text(text.clone()),
        nested => CellValue::Text(nested.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
