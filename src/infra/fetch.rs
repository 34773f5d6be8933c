use tracing::debug;

use crate::error::LoadError;
use crate::usecase::ports::resource::ResourceFetcher;

/// Reads `http(s)://` locators over the network and everything else from the
/// local filesystem. Nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| LoadError::unavailable(url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::unavailable(url, format!("HTTP {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| LoadError::unavailable(url, err))?;
        Ok(bytes.to_vec())
    }
}

impl ResourceFetcher for DefaultFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, LoadError> {
        if is_remote(locator) {
            debug!(locator, "fetching over http");
            self.fetch_http(locator).await
        } else {
            debug!(locator, "reading local file");
            read_local(locator)
        }
    }
}

pub fn is_remote(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(not(target_arch = "wasm32"))]
fn read_local(path: &str) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|err| LoadError::unavailable(path, err))
}

#[cfg(target_arch = "wasm32")]
fn read_local(path: &str) -> Result<Vec<u8>, LoadError> {
    Err(LoadError::unavailable(
        path,
        "local paths cannot be read in the browser; use an http(s) URL",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_schemes_are_remote() {
        assert!(is_remote("https://example.com/a.xlsx"));
        assert!(is_remote("HTTP://example.com/a.xlsx"));
        assert!(!is_remote("/FMSCA_records_(2).xlsx"));
        assert!(!is_remote("ftp://example.com/a.xlsx"));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let err = DefaultFetcher::new()
            .fetch("/definitely/not/here.xlsx")
            .await
            .expect_err("missing file should fail");
        assert!(matches!(err, LoadError::ResourceUnavailable { .. }));
    }
}
