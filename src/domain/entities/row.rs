use std::fmt;

use indexmap::IndexMap;

use crate::domain::entities::cell::CellValue;

pub const ID_FIELD: &str = "id";
pub const YEAR_FIELD: &str = "year";
pub const MONTH_FIELD: &str = "month";
pub const WEEK_FIELD: &str = "week";

/// One data row keyed by display header, tagged with its 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    id: u64,
    values: IndexMap<String, Option<CellValue>>,
}

impl NormalizedRow {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            values: IndexMap::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Sets `field`, replacing whatever an earlier column wrote there.
    pub fn set(&mut self, field: impl Into<String>, value: Option<CellValue>) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field).and_then(Option::as_ref)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }
}

/// Calendar parts derived from a row's date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarFields {
    Valid { year: i32, month: u32, week: u32 },
    /// The date field was absent or could not be parsed.
    Invalid,
}

impl CalendarFields {
    pub fn year(&self) -> Option<i32> {
        match self {
            CalendarFields::Valid { year, .. } => Some(*year),
            CalendarFields::Invalid => None,
        }
    }

    pub fn month(&self) -> Option<u32> {
        match self {
            CalendarFields::Valid { month, .. } => Some(*month),
            CalendarFields::Invalid => None,
        }
    }

    pub fn week(&self) -> Option<u32> {
        match self {
            CalendarFields::Valid { week, .. } => Some(*week),
            CalendarFields::Invalid => None,
        }
    }
}

/// Renders a calendar part, `NaN` for the invalid sentinel.
pub struct CalendarPart<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for CalendarPart<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("NaN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub row: NormalizedRow,
    pub calendar: CalendarFields,
}

impl GroupedRow {
    pub fn id(&self) -> u64 {
        self.row.id()
    }

    /// Display text of any attribute, including `id` and the derived
    /// calendar fields. Absent values render as `"null"`.
    pub fn attribute(&self, field: &str) -> String {
        match field {
            ID_FIELD if !self.row.contains(ID_FIELD) => self.row.id().to_string(),
            YEAR_FIELD => CalendarPart(self.calendar.year()).to_string(),
            MONTH_FIELD => CalendarPart(self.calendar.month()).to_string(),
            WEEK_FIELD => CalendarPart(self.calendar.week()).to_string(),
            _ => self
                .row
                .get(field)
                .map(ToString::to_string)
                .unwrap_or_else(|| "null".to_string()),
        }
    }
}
