//! Tabular and structured query results

use chatstat_ids::repair_text;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One value in a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl Cell {
    /// Text cell with mojibake repaired
    pub fn text(value: &str) -> Self {
        Cell::Text(repair_text(value).into_owned())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Rows under a fixed header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match header");
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Value {
        let records = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(cell_to_json))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(records)
    }
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Int(n) => Value::from(*n),
        Cell::Bool(b) => Value::Bool(*b),
    }
}

/// What a query hands back for persistence
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Table(Table),
    Document(Value),
}

impl QueryOutput {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            QueryOutput::Table(table) => Some(table),
            QueryOutput::Document(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QueryOutput::Table(table) => table.to_records(),
            QueryOutput::Document(value) => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::from("a").to_string(), "a");
        assert_eq!(Cell::from(3usize).to_string(), "3");
        assert_eq!(Cell::from(true).to_string(), "true");
    }

    #[test]
    fn test_cell_text_repairs_mojibake() {
        assert_eq!(Cell::text("\u{c5}\u{82}"), Cell::Text("ł".to_string()));
    }

    #[test]
    fn test_table_to_records() {
        let mut table = Table::new(["name", "count"]);
        table.push_row(vec![Cell::from("Łukasz"), Cell::from(2usize)]);
        assert_eq!(table.to_records(), json!([{"name": "Łukasz", "count": 2}]));
        assert_eq!(table.column("count"), Some(1));
    }

    #[test]
    fn test_output_as_table() {
        let output = QueryOutput::Document(json!({"a": 1}));
        assert!(output.as_table().is_none());
        assert_eq!(output.to_json(), json!({"a": 1}));
    }
}
