//! Spreadsheet file I/O
//!
//! Reads a whole CSV sheet into typed rows and rewrites it in full. The
//! rewrite goes through a temp file and a rename so an interrupted write
//! never leaves a truncated sheet behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExpenseError;

/// Read every row of a CSV sheet, returning an empty list if the file doesn't exist
///
/// Columns are matched to fields by header name.
pub fn read_csv<T, P>(path: P) -> Result<Vec<T>, ExpenseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(BufReader::new(file));

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| {
            // +2: one for the header, one for 1-based rows
            row.map_err(|e| {
                ExpenseError::Csv(format!("{} row {}: {}", path.display(), i + 2, e))
            })
        })
        .collect()
}

/// Rewrite a CSV sheet atomically (write to temp, then rename)
///
/// The header row is always written, even when `rows` is empty.
pub fn write_csv_atomic<T, P>(path: P, headers: &[&str], rows: &[T]) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("csv.tmp");

    let result = write_rows(&temp_path, headers, rows).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| ExpenseError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<(), ExpenseError> {
    let file = File::create(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;
    inner
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Value")]
        value: i32,
    }

    const HEADERS: [&str; 2] = ["Name", "Value"];

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let rows: Vec<Row> = read_csv(temp_dir.path().join("missing.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sheet.csv");
        let rows = vec![
            Row { name: "a, with comma".into(), value: 1 },
            Row { name: "b".into(), value: 2 },
        ];

        write_csv_atomic(&path, &HEADERS, &rows).unwrap();
        let loaded: Vec<Row> = read_csv(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_empty_write_keeps_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sheet.csv");

        write_csv_atomic::<Row, _>(&path, &HEADERS, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Value\n");
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sheet.csv");

        write_csv_atomic(&path, &HEADERS, &[Row { name: "x".into(), value: 0 }]).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("sheet.csv.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("sheet.csv");

        write_csv_atomic::<Row, _>(&path, &HEADERS, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_bad_row_reports_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sheet.csv");
        fs::write(&path, "Name,Value\nok,1\nbad,notanumber\n").unwrap();

        let err = read_csv::<Row, _>(&path).unwrap_err();
        assert!(matches!(err, ExpenseError::Csv(_)));
        assert!(err.to_string().contains("row 3"));
    }
}
