use crate::domain::entities::cell::CellValue;
use crate::domain::entities::grid::RawGrid;
use crate::error::LoadError;

/// Decodes a CSV document as a single-sheet grid. Header names are kept
/// verbatim; numeric and boolean data fields are typed the way a spreadsheet
/// would read them.
pub fn decode_csv(locator: &str, bytes: &[u8]) -> Result<RawGrid, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| LoadError::decode(locator, err))?;
        if headers.is_none() {
            headers = Some(record.iter().map(str::to_string).collect());
        } else {
            rows.push(record.iter().map(field_to_value).collect());
        }
    }

    Ok(RawGrid::new(headers.unwrap_or_default(), rows))
}

fn field_to_value(field: &str) -> Option<CellValue> {
    if field.is_empty() {
        return None;
    }
    if let Some(number) = field.trim().parse::<f64>().ok().filter(|v| v.is_finite()) {
        return Some(CellValue::Number(number));
    }
    match field {
        "TRUE" | "true" => Some(CellValue::Bool(true)),
        "FALSE" | "false" => Some(CellValue::Bool(false)),
        _ => Some(CellValue::Text(field.to_string())),
    }
}
