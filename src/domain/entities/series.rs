use serde::{Deserialize, Serialize};

/// Chart-ready label/value series. The JSON shape is also the persisted
/// chart-edit format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesDataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesDataset {
    pub label: String,
    pub data: Vec<f64>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.is_empty()
    }

    /// True when `other` describes the same labels and datasets, whatever
    /// the values.
    pub fn same_shape(&self, other: &Series) -> bool {
        self.labels == other.labels
            && self.datasets.len() == other.datasets.len()
            && self
                .datasets
                .iter()
                .zip(&other.datasets)
                .all(|(a, b)| a.label == b.label && a.data.len() == b.data.len())
    }

    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter().copied())
            .fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter())
            .sum()
    }
}

/// Output of the pivot engine: sorted row/column keys and the count matrix,
/// `matrix[row][col]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotData {
    pub row_attrs: Vec<String>,
    pub col_attrs: Vec<String>,
    pub row_keys: Vec<Vec<String>>,
    pub col_keys: Vec<Vec<String>>,
    pub matrix: Vec<Vec<f64>>,
}

impl PivotData {
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.matrix
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn row_total(&self, row: usize) -> f64 {
        self.matrix.get(row).map(|r| r.iter().sum()).unwrap_or(0.0)
    }

    pub fn col_total(&self, col: usize) -> f64 {
        (0..self.row_keys.len()).map(|row| self.value(row, col)).sum()
    }

    pub fn grand_total(&self) -> f64 {
        (0..self.row_keys.len()).map(|row| self.row_total(row)).sum()
    }
}
