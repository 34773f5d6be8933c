use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::row::{CalendarFields, GroupedRow, NormalizedRow};
use crate::error::FieldParseError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Attaches year/month/week derived from `date_field` to every row. Rows with
/// a missing or unparseable date keep their place with the invalid sentinel.
pub fn group_rows(rows: &[NormalizedRow], date_field: &str) -> Vec<GroupedRow> {
    rows.iter()
        .map(|row| {
            let calendar = match parse_date_field(row, date_field) {
                Ok(date) => calendar_fields(date),
                Err(err) => {
                    debug!(row_id = row.id(), "{err}");
                    CalendarFields::Invalid
                }
            };
            GroupedRow {
                row: row.clone(),
                calendar,
            }
        })
        .collect()
}

pub fn parse_date_field(
    row: &NormalizedRow,
    date_field: &str,
) -> Result<NaiveDateTime, FieldParseError> {
    let value = row.get(date_field);
    value.and_then(parse_date).ok_or_else(|| FieldParseError {
        field: date_field.to_string(),
        value: value.map(ToString::to_string).unwrap_or_default(),
    })
}

pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Text(text) => parse_date_text(text.trim()),
        CellValue::Number(_) | CellValue::Bool(_) => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn calendar_fields(date: NaiveDateTime) -> CalendarFields {
    let date = date.date();
    CalendarFields::Valid {
        year: date.year(),
        month: date.month(),
        week: week_number(date),
    }
}

/// `ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7)` with Sunday = 0.
/// Not ISO-8601: week 1 is whatever week contains January 1.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = date.with_ordinal(1).unwrap_or(date);
    let days = (date - jan1).num_days() as u32;
    let offset = jan1.weekday().num_days_from_sunday();
    (days + offset + 1).div_ceil(7)
}
