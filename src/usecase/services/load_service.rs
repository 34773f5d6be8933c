use tracing::{debug, error, info};

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::header::HeaderSpec;
use crate::domain::services::projector::{project, Projection};
use crate::error::LoadError;
use crate::infra::import::decode_grid;
use crate::usecase::ports::resource::ResourceFetcher;

/// Fetches, decodes and projects a spreadsheet.
pub struct LoadService<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> LoadService<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Reads the first sheet behind `locator`. Every call goes back to the
    /// source.
    pub async fn load_grid(&self, locator: &str) -> Result<RawGrid, LoadError> {
        let bytes = self.fetcher.fetch(locator).await?;
        debug!(locator, bytes = bytes.len(), "fetched");
        let grid = decode_grid(locator, bytes)?;
        debug!(locator, data_rows = grid.data_row_count(), "decoded first sheet");
        Ok(grid)
    }

    pub async fn load(&self, locator: &str, spec: &HeaderSpec) -> Result<Projection, LoadError> {
        info!(locator, "loading spreadsheet");
        match self.load_grid(locator).await {
            Ok(grid) => {
                let projection = project(&grid, spec);
                info!(
                    locator,
                    rows = projection.rows.len(),
                    columns = projection.display_headers.len(),
                    "spreadsheet loaded"
                );
                Ok(projection)
            }
            Err(err) => {
                error!(locator, "{err}");
                Err(err)
            }
        }
    }
}
