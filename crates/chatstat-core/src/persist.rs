//! Writing query results to disk

use crate::error::{AnalyticsError, Result};
use crate::table::{Cell, QueryOutput, Table};
use std::path::Path;
use tracing::warn;

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

/// Persist a query result, choosing the format from the path extension.
///
/// `.csv` gets a header row and no index column; anything else is JSON
/// with non-ASCII characters kept verbatim. Existing files are
/// overwritten with a warning.
pub fn persist_output(output: &QueryOutput, path: &Path) -> Result<()> {
    if path.exists() {
        warn!(path = %path.display(), "overwriting existing query output");
    }

    let is_csv = path.extension().and_then(|e| e.to_str()) == Some("csv");
    let data = match (is_csv, output) {
        (true, QueryOutput::Table(table)) => table_to_csv(table)?,
        (true, QueryOutput::Document(_)) => {
            return Err(AnalyticsError::InvalidConfig(format!(
                "{} expects a table but the query produced a document",
                path.display()
            )))
        }
        (false, output) => serde_json::to_vec_pretty(&output.to_json())?,
    };

    atomic_write(path, &data)?;
    Ok(())
}

fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| AnalyticsError::Io(err.into_error()))
}

/// Reload a persisted CSV result; every cell comes back as text
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = Table::new(reader.headers()?.iter());
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(Cell::from).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> Table {
        let mut table = Table::new(["user_id", "name", "count"]);
        table.push_row(vec![Cell::from("0_1"), Cell::from("Zoë, Jr."), Cell::from(4usize)]);
        table.push_row(vec![Cell::from("0_2"), Cell::from("Bob"), Cell::from(1usize)]);
        table
    }

    #[test]
    fn test_csv_roundtrip_preserves_shape() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out").join("0_query_test.csv");

        persist_output(&QueryOutput::Table(sample_table()), &path).unwrap();
        let loaded = read_csv(&path).unwrap();

        assert_eq!(loaded.columns(), sample_table().columns());
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rows()[0][1], Cell::from("Zoë, Jr."));
    }

    #[test]
    fn test_csv_has_header_and_no_index() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("0_query_test.csv");
        persist_output(&QueryOutput::Table(sample_table()), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("user_id,name,count"));
        assert_eq!(lines.next(), Some("0_1,\"Zoë, Jr.\",4"));
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("0_query_doc.json");
        persist_output(&QueryOutput::Document(json!([{"name": "Łucja 😀"}])), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Łucja 😀"));
        assert!(!contents.contains("\\u"));
    }

    #[test]
    fn test_overwrite_existing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("0_query_test.csv");
        std::fs::write(&path, "stale").unwrap();

        persist_output(&QueryOutput::Table(sample_table()), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("user_id"));
    }

    #[test]
    fn test_document_to_csv_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("0_query_doc.csv");
        let err = persist_output(&QueryOutput::Document(json!([])), &path).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidConfig(_)));
    }

    #[test]
    fn test_atomic_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("nested").join("file.txt");
        atomic_write(&path, b"Hello, world!").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"Hello, world!");
    }
}
