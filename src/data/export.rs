use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// File types the grid export button is allowed to produce.
pub const ACCEPTED_EXPORT_EXTENSIONS: &[&str] = &["xlsx", "csv", "pdf"];

pub fn is_accepted_export(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXPORT_EXTENSIONS.contains(&ext))
}

pub fn check_export_name(file_name: &str) -> E2eResult<()> {
    if is_accepted_export(file_name) {
        Ok(())
    } else {
        Err(E2eError::Download(format!(
            "unexpected export file {:?}; expected one of {:?}",
            file_name, ACCEPTED_EXPORT_EXTENSIONS
        )))
    }
}

/// A parsed CSV export. Fields and headers are trimmed; short rows are padded
/// with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

pub fn parse_csv(text: &str) -> E2eResult<CsvTable> {
    if text.trim().is_empty() {
        return Ok(CsvTable::default());
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or_default().to_string()))
                .collect(),
        );
    }
    Ok(CsvTable { headers, rows })
}

pub fn read_csv(path: &Path) -> E2eResult<CsvTable> {
    parse_csv(&fs::read_to_string(path)?)
}

impl CsvTable {
    /// First header containing `needle`, case-insensitively.
    pub fn find_column(&self, needle: &str) -> Option<&str> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .find(|h| h.to_lowercase().contains(&needle))
            .map(|h| h.as_str())
    }

    pub fn rows_where(&self, column: &str, value: &str) -> Vec<&HashMap<String, String>> {
        self.rows
            .iter()
            .filter(|r| r.get(column).map(|v| v.as_str()) == Some(value))
            .collect()
    }
}

/// SHA-1 of a file's bytes, hex encoded.
pub fn fingerprint(path: &Path) -> E2eResult<String> {
    use sha1::{Digest, Sha1};

    let bytes = fs::read(path)?;
    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
