//! File Source
//!
//! Reads a catalog dump from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{decode_podcasts, read_file, PodcastSource};
use crate::error::SourceError;
use crate::podcast::PodcastRecord;

/// JSON file catalog
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read podcasts from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PodcastSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError> {
        let podcasts = decode_podcasts(&read_file(&self.path).await?)?;

        tracing::info!(
            path = %self.path.display(),
            count = podcasts.len(),
            "Loaded podcasts from file"
        );
        Ok(podcasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_podcasts() {
        let podcasts = write_temp(
            r#"[{"id": "1", "title": "A", "image": "", "seasons": 2, "updated": "2023-01-01", "genres": [1]},
                {"id": "2", "title": "B", "image": "", "seasons": 1, "updated": "2023-01-01"}]"#,
        );

        let source = FileSource::new(podcasts.path());
        let loaded = source.fetch().await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].genres, vec![1]);
        assert!(loaded[1].season_details.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let source = FileSource::new("/nonexistent/podcasts.json");
        assert!(matches!(
            source.fetch().await,
            Err(SourceError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let file = write_temp("not json");
        let source = FileSource::new(file.path());
        assert!(matches!(source.fetch().await, Err(SourceError::Decode(_))));
    }
}
