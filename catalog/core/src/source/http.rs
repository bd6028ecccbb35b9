//! HTTP Source
//!
//! Fetches the podcast list from the public catalog API.

use std::time::Duration;

use async_trait::async_trait;

use super::{decode_podcasts, PodcastSource};
use crate::error::SourceError;
use crate::podcast::PodcastRecord;

/// Public catalog endpoint
pub const DEFAULT_API_URL: &str = "https://podcast-api.netlify.app";

/// Catalog API client
#[derive(Clone, Debug)]
pub struct HttpSource {
    url: String,
    http_client: reqwest::Client,
}

impl HttpSource {
    /// Create a client for `url` with a request timeout
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }

    /// Endpoint this source requests
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PodcastSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError> {
        tracing::debug!(url = %self.url, "Fetching podcasts");

        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let podcasts = decode_podcasts(&body)?;

        tracing::info!(count = podcasts.len(), "Fetched podcasts");
        Ok(podcasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let source = HttpSource::new("http://127.0.0.1:9/", Duration::from_millis(500)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Failed to load podcasts. Please try again later."
        );
    }

    #[test]
    fn test_url_is_kept() {
        let source = HttpSource::new(DEFAULT_API_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(source.url(), DEFAULT_API_URL);
        assert_eq!(source.name(), "http");
    }
}
