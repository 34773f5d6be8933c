pub mod csv;
pub mod xlsx;

use crate::domain::entities::grid::RawGrid;
use crate::error::LoadError;

/// Picks the decoder from the locator's extension; anything that is not a
/// `.csv` goes through workbook auto-detection.
pub fn decode_grid(locator: &str, bytes: Vec<u8>) -> Result<RawGrid, LoadError> {
    if is_csv(locator) {
        csv::decode_csv(locator, &bytes)
    } else {
        xlsx::decode_workbook(locator, bytes)
    }
}

fn is_csv(locator: &str) -> bool {
    let path = locator.split(['?', '#']).next().unwrap_or(locator);
    path.to_ascii_lowercase().ends_with(".csv")
}
