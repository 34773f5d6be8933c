//! Reductions from grouped rows to chart series.

use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::row::GroupedRow;
use crate::domain::entities::series::{PivotData, Series, SeriesDataset};

pub const KEY_SEPARATOR: &str = " - ";
pub const INVALID_MONTH_LABEL: &str = "NaN-NaN";

/// Counts rows per `"{year}-{month}"`.
///
/// Labels cover every month of every year from the earliest to the latest
/// observed year, zero-filled, in chronological order. Rows without a valid
/// date are counted in a trailing `NaN-NaN` bucket that only exists when such
/// rows do.
pub fn monthly_counts(rows: &[GroupedRow], dataset_label: &str) -> Series {
    let mut counts: HashMap<(i32, u32), f64> = HashMap::new();
    let mut years = BTreeSet::new();
    let mut invalid = 0.0;

    for row in rows {
        match (row.calendar.year(), row.calendar.month()) {
            (Some(year), Some(month)) => {
                years.insert(year);
                *counts.entry((year, month)).or_insert(0.0) += 1.0;
            }
            _ => invalid += 1.0,
        }
    }

    let mut labels = Vec::new();
    let mut data = Vec::new();
    if let (Some(&first), Some(&last)) = (years.first(), years.last()) {
        for year in first..=last {
            for month in 1..=12 {
                labels.push(format!("{year}-{month}"));
                data.push(counts.get(&(year, month)).copied().unwrap_or(0.0));
            }
        }
    }
    if invalid > 0.0 {
        labels.push(INVALID_MONTH_LABEL.to_string());
        data.push(invalid);
    }

    Series {
        labels,
        datasets: vec![SeriesDataset {
            label: dataset_label.to_string(),
            data,
        }],
    }
}

/// One dataset per pivot column key; labels are the joined row keys.
pub fn pivot_series(row_keys: &[Vec<String>], col_keys: &[Vec<String>], matrix: &[Vec<f64>]) -> Series {
    let labels = row_keys.iter().map(|key| key.join(KEY_SEPARATOR)).collect();
    let datasets = col_keys
        .iter()
        .enumerate()
        .map(|(col, key)| SeriesDataset {
            label: key.join(KEY_SEPARATOR),
            data: (0..row_keys.len())
                .map(|row| {
                    matrix
                        .get(row)
                        .and_then(|values| values.get(col))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect(),
        })
        .collect();

    Series { labels, datasets }
}

pub fn series_from_pivot(pivot: &PivotData) -> Series {
    pivot_series(&pivot.row_keys, &pivot.col_keys, &pivot.matrix)
}
