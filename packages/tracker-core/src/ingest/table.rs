//! Row-oriented table model decoded from CSV.

use crate::Result;
use csv::ReaderBuilder;

/// An in-memory tabular payload: named columns and string cells.
///
/// Cells are kept as raw strings; coercion to numbers and dates is the
/// normalizer's job. Unknown columns are carried along and ignored
/// downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table directly from headers and rows. Mostly useful in tests.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Decode a table from CSV text. The first record is the header row.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_bytes(content.as_bytes())
    }

    /// Decode a table from raw CSV bytes.
    ///
    /// Rows may be ragged; short rows read as empty cells downstream.
    pub fn from_csv_bytes(content: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let cells: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
            if idx == 0 {
                headers = cells.into_iter().map(|h| h.trim().to_string()).collect();
            } else {
                rows.push(cells);
            }
        }

        Ok(Self { headers, rows })
    }

    /// Column headers in table order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Exact, case-sensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether the table has a column with this exact name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell content at (row, column), or `""` for cells missing from a
    /// ragged row.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether every cell in a data row is blank.
    pub fn row_is_blank(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map(|r| r.iter().all(|cell| cell.trim().is_empty()))
            .unwrap_or(true)
    }
}
