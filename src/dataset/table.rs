use std::fmt;

/// A single typed cell of a loaded table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Type this cell contributes to column inference, `None` for missing values.
    fn kind(&self) -> Option<ColumnType> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(_) => Some(ColumnType::Boolean),
            CellValue::Int(_) => Some(ColumnType::Integer),
            CellValue::Float(_) => Some(ColumnType::Float),
            CellValue::Text(_) => Some(ColumnType::Text),
            CellValue::DateTime(_) => Some(ColumnType::DateTime),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) | CellValue::DateTime(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    DateTime,
    Text,
    /// Every value in the column is missing.
    Empty,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
        }
    }

    /// Widen two observed kinds into the narrowest type holding both.
    fn unify(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Empty, other) | (other, Empty) => other,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Text,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// Rows × named columns. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table and infer column types from the cells.
    ///
    /// Short rows are padded with [`CellValue::Null`]; extra trailing cells
    /// are dropped.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = column_names.len();
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();

        let columns = column_names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Column {
                name,
                dtype: infer_column_type(rows.iter().map(|row| &row[index])),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn has_missing_values(&self) -> bool {
        self.rows.iter().flatten().any(CellValue::is_null)
    }
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a CellValue>) -> ColumnType {
    cells
        .filter_map(CellValue::kind)
        .fold(ColumnType::Empty, ColumnType::unify)
}

/// Contents of a successfully loaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Table(Table),
    Text(String),
}

impl Dataset {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Dataset::Table(table) => Some(table),
            Dataset::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn integer_and_float_cells_widen_to_float() {
        let table = Table::new(
            names(&["value"]),
            vec![vec![CellValue::Int(1)], vec![CellValue::Float(2.5)]],
        );
        assert_eq!(table.columns()[0].dtype, ColumnType::Float);
    }

    #[test]
    fn missing_values_do_not_affect_inference() {
        let table = Table::new(
            names(&["id", "blank"]),
            vec![
                vec![CellValue::Int(1), CellValue::Null],
                vec![CellValue::Null, CellValue::Null],
            ],
        );
        assert_eq!(table.columns()[0].dtype, ColumnType::Integer);
        assert_eq!(table.columns()[1].dtype, ColumnType::Empty);
        assert!(table.has_missing_values());
    }

    #[test]
    fn mixed_kinds_fall_back_to_text() {
        let table = Table::new(
            names(&["mixed"]),
            vec![vec![CellValue::Bool(true)], vec![CellValue::Int(3)]],
        );
        assert_eq!(table.columns()[0].dtype, ColumnType::Text);
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let table = Table::new(
            names(&["a", "b", "c"]),
            vec![vec![CellValue::Int(1)], vec![CellValue::Int(1); 4]],
        );
        assert!(table.rows().iter().all(|row| row.len() == 3));
        assert_eq!(table.rows()[0][2], CellValue::Null);
    }
}
