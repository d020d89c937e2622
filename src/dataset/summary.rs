use std::fmt;

use super::table::{ColumnType, Table};

/// Read-only shape of a table, used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_types: Vec<(String, ColumnType)>,
    pub has_missing_values: bool,
}

pub fn summarize(table: &Table) -> DatasetSummary {
    DatasetSummary {
        row_count: table.row_count(),
        column_count: table.column_count(),
        column_names: table.column_names().map(str::to_string).collect(),
        column_types: table
            .columns()
            .iter()
            .map(|column| (column.name.clone(), column.dtype))
            .collect(),
        has_missing_values: table.has_missing_values(),
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.row_count)?;
        writeln!(f, "Columns: {}", self.column_count)?;
        for (name, dtype) in &self.column_types {
            writeln!(f, "  {name}: {dtype}")?;
        }
        write!(
            f,
            "Missing values: {}",
            if self.has_missing_values { "yes" } else { "no" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::table::CellValue;

    #[test]
    fn summary_projects_table_shape() {
        let table = Table::new(
            vec!["id".to_string(), "amount".to_string()],
            vec![
                vec![CellValue::Int(1), CellValue::Float(2.5)],
                vec![CellValue::Int(2), CellValue::Null],
            ],
        );

        let summary = summarize(&table);
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.column_count, 2);
        assert_eq!(summary.column_names, vec!["id", "amount"]);
        assert_eq!(
            summary.column_types,
            vec![
                ("id".to_string(), ColumnType::Integer),
                ("amount".to_string(), ColumnType::Float),
            ]
        );
        assert!(summary.has_missing_values);
    }

    #[test]
    fn summary_display_lists_types() {
        let table = Table::new(vec!["flag".to_string()], vec![vec![CellValue::Bool(true)]]);
        let rendered = summarize(&table).to_string();
        assert_eq!(
            rendered,
            "Rows: 1\nColumns: 1\n  flag: boolean\nMissing values: no"
        );
    }
}
