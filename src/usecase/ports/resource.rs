use std::future::Future;

use crate::error::LoadError;

/// Retrieves the raw bytes behind a resource locator.
pub trait ResourceFetcher {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>>;
}
