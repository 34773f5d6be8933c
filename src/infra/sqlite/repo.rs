use std::path::PathBuf;

use crate::error::StoreError;
use crate::infra::sqlite::queries::{load_value, upsert_value};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::state_store::StateStore;

/// State store backed by a single-table SQLite database.
pub struct SqliteStateStore {
    pub db_path: PathBuf,
}

impl SqliteStateStore {
    pub fn open(db_path: PathBuf) -> Result<Self, StoreError> {
        init_db(&db_path).map_err(|err| StoreError::Unavailable(format!("{err:#}")))?;
        Ok(Self { db_path })
    }
}

impl StateStore for SqliteStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        load_value(&self.db_path, key).map_err(|err| StoreError::Unavailable(format!("{err:#}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        upsert_value(&self.db_path, key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:#}")))
    }
}
