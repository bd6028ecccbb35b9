//! Podcast Data Sources
//!
//! The boundary between the catalog and wherever podcast records come from.
//! A source delivers the whole list at once, or one [`SourceError`]; the core
//! never sees partial data.
//!
//! # Implementations
//!
//! - [`HttpSource`]: the public catalog API
//! - [`FileSource`]: a JSON dump on disk
//! - [`StaticSource`]: an in-memory list
//!
//! [`WithSeasons`] wraps any of these to attach season details from a file.

mod file;
mod http;
mod seasons;

use std::path::Path;

use async_trait::async_trait;

pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_API_URL};
pub use seasons::WithSeasons;

use crate::error::SourceError;
use crate::podcast::PodcastRecord;

/// Something that can produce the podcast list
#[async_trait]
pub trait PodcastSource: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// Fetch the complete podcast list
    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError>;
}

#[async_trait]
impl<S: PodcastSource + ?Sized> PodcastSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError> {
        (**self).fetch().await
    }
}

/// Read a whole file, mapping failures to [`SourceError::Read`]
pub(crate) async fn read_file(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Fixed in-memory list
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    podcasts: Vec<PodcastRecord>,
}

impl StaticSource {
    /// Serve the given records
    #[must_use]
    pub fn new(podcasts: Vec<PodcastRecord>) -> Self {
        Self { podcasts }
    }
}

#[async_trait]
impl PodcastSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError> {
        Ok(self.podcasts.clone())
    }
}

/// Decode a JSON array of podcast records
///
/// # Errors
///
/// Returns [`SourceError::Decode`] if the body is not a record array.
pub fn decode_podcasts(body: &str) -> Result<Vec<PodcastRecord>, SourceError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_returns_list() {
        let source = StaticSource::new(vec![PodcastRecord::new("1", "A", "", 1, "", vec![])]);
        let podcasts = source.fetch().await.unwrap();
        assert_eq!(podcasts.len(), 1);
        assert_eq!(source.name(), "static");
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode_podcasts(r#"{"id": "1"}"#),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_mixed_ids() {
        let podcasts = decode_podcasts(
            r#"[
                {"id": "10716", "title": "A", "image": "", "seasons": 1, "updated": ""},
                {"id": 5, "title": "B", "image": "", "seasons": 2, "updated": ""}
            ]"#,
        )
        .unwrap();
        assert_eq!(podcasts[0].id.as_str(), "10716");
        assert_eq!(podcasts[1].id.as_str(), "5");
    }
}
