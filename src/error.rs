use thiserror::Error;

/// Failures of the spreadsheet loader. These are never recovered locally;
/// the view shows them as a failed load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The resource could not be read (I/O, network, non-success status).
    #[error("resource unavailable: {locator}: {reason}")]
    ResourceUnavailable { locator: String, reason: String },

    /// The bytes are not a readable spreadsheet, or it has no sheets.
    #[error("cannot decode spreadsheet {locator}: {reason}")]
    DecodeError { locator: String, reason: String },
}

impl LoadError {
    pub fn unavailable(locator: &str, reason: impl ToString) -> Self {
        LoadError::ResourceUnavailable {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(locator: &str, reason: impl ToString) -> Self {
        LoadError::DecodeError {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A date field that could not be parsed. Always recovered into the invalid
/// calendar sentinel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {field} as a date: {value}")]
pub struct FieldParseError {
    pub field: String,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    #[error("stored state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no chart value at dataset {dataset}, index {index}")]
    MissingValue { dataset: usize, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_display_names_locator() {
        let err = LoadError::unavailable("/missing.xlsx", "not found");
        assert_eq!(
            err.to_string(),
            "resource unavailable: /missing.xlsx: not found"
        );
    }

    #[test]
    fn field_parse_error_display() {
        let err = FieldParseError {
            field: "Out of service date".to_string(),
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse Out of service date as a date: not-a-date"
        );
    }
}
