use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::grid::RawGrid;
use crate::error::LoadError;

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

pub fn cell_to_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(v) => Some(CellValue::Text(v.clone())),
        Data::Float(v) => Some(CellValue::Number(*v)),
        Data::Int(v) => Some(CellValue::Number(*v as f64)),
        Data::Bool(v) => Some(CellValue::Bool(*v)),
        Data::DateTime(v) => Some(
            excel_serial_to_datetime(v.as_f64())
                .map(CellValue::DateTime)
                .unwrap_or(CellValue::Number(v.as_f64())),
        ),
        Data::DateTimeIso(v) => Some(
            NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f")
                .map(CellValue::DateTime)
                .unwrap_or_else(|_| CellValue::Text(v.clone())),
        ),
        Data::DurationIso(v) => Some(CellValue::Text(v.clone())),
        Data::Error(v) => Some(CellValue::Text(v.to_string())),
    }
}

/// Days since 1899-12-30, the fraction being the time of day.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Decodes the first sheet of an xlsx/xlsm/xls/ods document.
pub fn decode_workbook(locator: &str, bytes: Vec<u8>) -> Result<RawGrid, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| LoadError::decode(locator, err))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::decode(locator, "workbook has no sheets"))?
        .map_err(|err| LoadError::decode(locator, err))?;

    Ok(RawGrid::from_rows(anchored_rows(&range)))
}

/// Rows of `range` positioned from cell A1: blank leading rows and columns
/// are kept as absent cells so the header is always the sheet's first row.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<Option<CellValue>>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };
    let width = first_col as usize + range.width();

    let mut rows: Vec<Vec<Option<CellValue>>> = (0..first_row).map(|_| vec![None; width]).collect();
    for cells in range.rows() {
        let mut row = vec![None; first_col as usize];
        row.extend(cells.iter().map(cell_to_value));
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_days_convert_to_dates() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date");
        assert_eq!(excel_serial_to_datetime(44936.5), Some(expected));
        assert_eq!(excel_serial_to_datetime(-1.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn empty_cells_are_absent() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(
            cell_to_value(&Data::Int(42)),
            Some(CellValue::Number(42.0))
        );
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_workbook("bad.xlsx", b"definitely not a workbook".to_vec())
            .expect_err("garbage should not decode");
        assert!(matches!(err, LoadError::DecodeError { .. }));
    }
}
