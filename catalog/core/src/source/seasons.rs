//! Season Details Overlay
//!
//! Season details are published separately from the podcast list, as an
//! array of `{ id, seasonDetails }` entries. [`WithSeasons`] reads that file
//! after the inner source has delivered and attaches the details by id, so
//! any source can feed the modal's season list.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{read_file, PodcastSource};
use crate::error::SourceError;
use crate::podcast::{attach_seasons, PodcastRecord, SeasonEntry};

/// A source whose records get season details from a JSON file
#[derive(Clone, Debug)]
pub struct WithSeasons<S> {
    inner: S,
    path: PathBuf,
}

impl<S: PodcastSource> WithSeasons<S> {
    /// Attach the seasons in `path` to whatever `inner` fetches
    pub fn new(inner: S, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: PodcastSource> PodcastSource for WithSeasons<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch(&self) -> Result<Vec<PodcastRecord>, SourceError> {
        let mut podcasts = self.inner.fetch().await?;
        let entries: Vec<SeasonEntry> = serde_json::from_str(&read_file(&self.path).await?)?;
        let attached = attach_seasons(&mut podcasts, entries);

        tracing::info!(
            path = %self.path.display(),
            attached,
            "Attached season details"
        );
        Ok(podcasts)
    }
}
