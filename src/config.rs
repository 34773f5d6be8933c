use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::services::schema::header_schema;

pub const DEFAULT_SOURCE: &str = "assets/FMSCA_records_(2).xlsx";
pub const DEFAULT_DATE_FIELD: &str = "Out of service date";
pub const SOURCE_ENV: &str = "FMSCA_SOURCE";
pub const DATE_FIELD_ENV: &str = "FMSCA_DATE_FIELD";

header_schema! {
    /// One carrier record as shown by the viewer.
    pub struct CarrierRecord {
        created_dt: "created_dt" => "Created_DT",
        modified_dt: "data_source_modified_dt" => "Modifed_DT",
        entity_type: "entity_type" => "Entity",
        operating_status: "operating_status" => "Operating status",
        legal_name: "legal_name" => "Legal name",
        dba_name: "dba_name" => "DBA name",
        physical_address: "physical_address" => "Physical address",
        p_street: "p_street" => "PStreet",
        p_city: "p_city" => "PCity",
        p_state: "p_state" => "PState",
        p_zip_code: "p_zip_code" => "PZip Code",
        phone: "phone" => "Phone",
        mailing_address: "mailing_address" => "Maling address",
        m_street: "m_street" => "MStreet",
        m_city: "m_city" => "MCity",
        m_state: "m_state" => "MState",
        m_zip_code: "m_zip_code" => "MZip Code",
        usdot_number: "usdot_number" => "DOT",
        mc_mx_ff_number: "mc_mx_ff_number" => "MC/MX/FF",
        power_units: "power_units" => "Power units",
        mcs_150_form_date: "mcs_150_form_date" => "mcs_150_form_date",
        out_of_service_date: "out_of_service_date" => "Out of service date",
        state_carrier_id_number: "state_carrier_id_number" => "state_carrier_id_number",
        duns_number: "duns_number" => "duns_number",
        drivers: "drivers" => "drivers",
        mcs_150_mileage_year: "mcs_150_mileage_year" => "mcs_150_mileage_year",
        source_id: "id" => "id",
        credit_score: "credit_score" => "credit_score",
        record_status: "record_status" => "record_status",
    }
}

/// Headline numbers shown above the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarrierSummary {
    pub carriers: usize,
    pub out_of_service: usize,
    pub states: usize,
}

impl CarrierSummary {
    pub fn from_records(records: &[CarrierRecord]) -> Self {
        let states: BTreeSet<String> = records
            .iter()
            .filter_map(|record| record.p_state.as_ref())
            .map(ToString::to_string)
            .collect();
        Self {
            carriers: records.len(),
            out_of_service: records
                .iter()
                .filter(|record| record.out_of_service_date.is_some())
                .count(),
            states: states.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: String,
    pub date_field: String,
    pub state_db_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads overrides from the environment, after loading `.env` if present.
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!("ignoring unreadable .env: {err}");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            source: non_empty(SOURCE_ENV).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            date_field: non_empty(DATE_FIELD_ENV).unwrap_or_else(|| DEFAULT_DATE_FIELD.to_string()),
            state_db_path: default_state_db_path(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_state_db_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "fmsca", "viewer")
        .map(|dirs| dirs.data_local_dir().join("state.sqlite"))
}

#[cfg(target_arch = "wasm32")]
fn default_state_db_path() -> Option<PathBuf> {
    None
}
