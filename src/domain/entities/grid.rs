use crate::domain::entities::cell::CellValue;

/// First sheet of a workbook as decoded: header row plus positional data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl RawGrid {
    /// Splits decoded rows into header row and data rows. Header cells are
    /// taken by display text; empty header cells become empty names.
    pub fn from_rows(mut rows: Vec<Vec<Option<CellValue>>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows
            .remove(0)
            .into_iter()
            .map(|cell| cell.map(|value| value.to_string()).unwrap_or_default())
            .collect();
        Self { headers, rows }
    }

    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<CellValue>>>) -> Self {
        Self { headers, rows }
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `row` / `col`, absent when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col)).and_then(Option::as_ref)
    }
}
