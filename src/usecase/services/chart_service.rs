use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::series::Series;
use crate::error::StoreError;
use crate::usecase::ports::state_store::StateStore;

pub const CHART_DATA_KEY: &str = "chartData";

/// Chart values the user has edited, persisted through a [`StateStore`].
pub struct ChartService {
    store: Arc<dyn StateStore>,
    key: String,
}

impl ChartService {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_key(store, CHART_DATA_KEY)
    }

    pub fn with_key(store: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn load(&self) -> Result<Option<Series>, StoreError> {
        match self.store.load(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, series: &Series) -> Result<(), StoreError> {
        let json = serde_json::to_string(series)?;
        self.store.save(&self.key, &json)
    }

    /// Returns the stored edits when they still describe `computed`'s labels
    /// and datasets, otherwise `computed`. Store failures fall back to
    /// `computed`.
    pub fn restore(&self, computed: Series) -> Series {
        match self.load() {
            Ok(Some(stored)) if stored.same_shape(&computed) => stored,
            Ok(_) => computed,
            Err(err) => {
                warn!(key = %self.key, "failed to restore chart edits: {err}");
                computed
            }
        }
    }

    /// Sets one value and writes the whole series back.
    pub fn edit(
        &self,
        series: &mut Series,
        dataset: usize,
        index: usize,
        value: f64,
    ) -> Result<(), StoreError> {
        let slot = series
            .datasets
            .get_mut(dataset)
            .and_then(|d| d.data.get_mut(index))
            .ok_or(StoreError::MissingValue { dataset, index })?;
        *slot = value;
        self.save(series)
    }
}
