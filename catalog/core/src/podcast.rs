//! Podcast Records
//!
//! The canonical catalog data, as delivered by a [`PodcastSource`]. The core
//! never mutates a record; cards only ever see an attribute projection of it.
//!
//! [`PodcastSource`]: crate::source::PodcastSource

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::genres::GenreId;

/// Podcast identifier
///
/// The catalog API emits ids as strings, older dumps as integers. Both are
/// normalised to their decimal/text form so lookups compare one way.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct PodcastId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for PodcastId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<PodcastId> for String {
    fn from(id: PodcastId) -> Self {
        id.0
    }
}

impl PodcastId {
    /// Create an id from its text form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text (what a card's `id` carries)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PodcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PodcastId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PodcastId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PodcastId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One season of a podcast
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDetail {
    /// Season title
    pub title: String,
    /// Number of episodes in the season
    pub episodes: u32,
}

impl SeasonDetail {
    /// Create a season entry
    pub fn new(title: impl Into<String>, episodes: u32) -> Self {
        Self {
            title: title.into(),
            episodes,
        }
    }
}

/// Canonical data describing one podcast
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastRecord {
    /// Unique id, stable across renders
    pub id: PodcastId,
    /// Display title
    pub title: String,
    /// Cover image URI
    pub image: String,
    /// Number of seasons
    pub seasons: u32,
    /// ISO-8601 last-updated timestamp
    pub updated: String,
    /// Genre ids in display order (duplicates allowed)
    #[serde(default)]
    pub genres: Vec<GenreId>,
    /// Long description (detail view only)
    #[serde(default)]
    pub description: String,
    /// Per-season details; season N is index N-1
    #[serde(default)]
    pub season_details: Vec<SeasonDetail>,
}

impl PodcastRecord {
    /// Create a record with the card-visible fields; the rest default to empty
    pub fn new(
        id: impl Into<PodcastId>,
        title: impl Into<String>,
        image: impl Into<String>,
        seasons: u32,
        updated: impl Into<String>,
        genres: Vec<GenreId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: image.into(),
            seasons,
            updated: updated.into(),
            genres,
            description: String::new(),
            season_details: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the season details
    #[must_use]
    pub fn with_season_details(mut self, seasons: Vec<SeasonDetail>) -> Self {
        self.season_details = seasons;
        self
    }
}

/// Season details published separately from the podcast list, keyed by id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonEntry {
    /// Podcast the seasons belong to
    pub id: PodcastId,
    /// Seasons in order
    #[serde(default)]
    pub season_details: Vec<SeasonDetail>,
}

/// Copy season details onto the records whose id matches an entry
///
/// Records with no matching entry are left as they are. Returns how many
/// records received details.
pub fn attach_seasons(records: &mut [PodcastRecord], entries: Vec<SeasonEntry>) -> usize {
    let mut by_id: HashMap<PodcastId, Vec<SeasonDetail>> = entries
        .into_iter()
        .map(|entry| (entry.id, entry.season_details))
        .collect();

    let mut attached = 0;
    for record in records.iter_mut() {
        if let Some(details) = by_id.remove(&record.id) {
            record.season_details = details;
            attached += 1;
        }
    }

    tracing::debug!(attached, unmatched = by_id.len(), "Attached season details");
    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "10716",
            "title": "Something Was Wrong",
            "description": "An Iris Award-winning docuseries",
            "seasons": 14,
            "image": "https://example.com/cover.jpg",
            "genres": [2, 1],
            "updated": "2022-11-03T07:00:00.000Z"
        }"#;

        let record: PodcastRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, PodcastId::new("10716"));
        assert_eq!(record.seasons, 14);
        assert_eq!(record.genres, vec![2, 1]);
        assert!(record.season_details.is_empty());
    }

    #[test]
    fn test_integer_id_is_normalised() {
        let json = r#"{"id": 42, "title": "X", "image": "", "seasons": 1, "updated": ""}"#;
        let record: PodcastRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "42");
        assert!(record.genres.is_empty());
    }

    #[test]
    fn test_id_serializes_as_text() {
        let value = serde_json::to_value(PodcastId::new("7")).unwrap();
        assert_eq!(value, serde_json::json!("7"));
    }

    #[test]
    fn test_season_details_camel_case() {
        let json = r#"{"id": "1", "seasonDetails": [{"title": "Pilot", "episodes": 8}]}"#;
        let entry: SeasonEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.season_details, vec![SeasonDetail::new("Pilot", 8)]);
    }

    #[test]
    fn test_attach_seasons_by_id() {
        let mut records = vec![
            PodcastRecord::new("1", "A", "", 1, "", vec![]),
            PodcastRecord::new("2", "B", "", 2, "", vec![]),
        ];
        let entries = vec![
            SeasonEntry {
                id: PodcastId::new("2"),
                season_details: vec![SeasonDetail::new("One", 3), SeasonDetail::new("Two", 4)],
            },
            SeasonEntry {
                id: PodcastId::new("99"),
                season_details: vec![SeasonDetail::new("Orphan", 1)],
            },
        ];

        assert_eq!(attach_seasons(&mut records, entries), 1);
        assert!(records[0].season_details.is_empty());
        assert_eq!(records[1].season_details.len(), 2);
    }
}
