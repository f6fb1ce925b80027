//! Image provider adapter backed by the cataas.com HTTP API.

use crate::error::{CatswpError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PROVIDER_URL: &str = "https://cataas.com";

/// A picture as handed out by the provider.
///
/// `id` is the provider's own identifier and only used to detect duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub id: String,
    pub locator: String,
}

/// Supplies image references on demand. Results may repeat.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn fetch_reference(&self) -> Result<ImageReference>;
}

/// Downloads the raw bytes behind a locator
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, locator: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct CatMetadata {
    #[serde(alias = "_id")]
    id: String,
}

/// HTTP client for cataas.com (or any server exposing the same API)
#[derive(Debug, Clone)]
pub struct CataasClient {
    client: reqwest::Client,
    base_url: String,
}

impl CataasClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CatswpError::ProviderUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint returning metadata for a random cat
    pub fn random_endpoint(&self) -> String {
        format!("{}/cat?json=true", self.base_url)
    }

    /// Stable locator for the picture with the given provider id
    pub fn locator_for(&self, id: &str) -> String {
        format!("{}/cat/{}", self.base_url, id)
    }
}

#[async_trait]
impl ImageProvider for CataasClient {
    async fn fetch_reference(&self) -> Result<ImageReference> {
        let response = self
            .client
            .get(self.random_endpoint())
            .send()
            .await
            .map_err(|e| CatswpError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatswpError::ProviderUnavailable(format!(
                "Provider returned status {}",
                status
            )));
        }

        let metadata: CatMetadata = response.json().await.map_err(|e| {
            CatswpError::ProviderUnavailable(format!("Malformed provider response: {}", e))
        })?;

        Ok(ImageReference {
            locator: self.locator_for(&metadata.id),
            id: metadata.id,
        })
    }
}

#[async_trait]
impl ImageSource for CataasClient {
    async fn fetch_image(&self, locator: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| CatswpError::PreloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatswpError::PreloadFailed(format!(
                "Image request returned status {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatswpError::PreloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CataasClient {
        CataasClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let client = client("https://cataas.com/");
        assert_eq!(client.base_url(), "https://cataas.com");
        assert_eq!(
            client.random_endpoint(),
            "https://cataas.com/cat?json=true"
        );
        assert_eq!(
            client.locator_for("abc123"),
            "https://cataas.com/cat/abc123"
        );
    }

    #[test]
    fn test_metadata_accepts_both_id_keys() {
        let current: CatMetadata =
            serde_json::from_str(r#"{"id":"abc","tags":["cute"],"mimetype":"image/jpeg"}"#)
                .unwrap();
        assert_eq!(current.id, "abc");

        let legacy: CatMetadata = serde_json::from_str(r#"{"_id":"def","tags":[]}"#).unwrap();
        assert_eq!(legacy.id, "def");
    }

    #[test]
    fn test_metadata_without_id_is_rejected() {
        let result: std::result::Result<CatMetadata, _> = serde_json::from_str(r#"{"tags":[]}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let client = CataasClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = client.fetch_reference().await;
        assert!(matches!(result, Err(CatswpError::ProviderUnavailable(_))));
    }
}
