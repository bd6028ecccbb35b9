//! Declared card attributes
//!
//! The five string attributes a card watches, and the snapshot of their
//! current values ([`CardViewState`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::view::CardRegion;

/// A watched attribute of a preview card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardAttribute {
    /// Podcast title
    Title,
    /// Cover image URI
    Image,
    /// Season count as a decimal string
    Seasons,
    /// ISO-8601 updated timestamp
    Updated,
    /// Comma-separated genre ids
    Genres,
}

/// Every attribute whose change triggers a re-render, in declaration order
pub const WATCHED: [CardAttribute; 5] = [
    CardAttribute::Title,
    CardAttribute::Image,
    CardAttribute::Seasons,
    CardAttribute::Updated,
    CardAttribute::Genres,
];

impl CardAttribute {
    /// Attribute name as declared on the element
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Image => "image",
            Self::Seasons => "seasons",
            Self::Updated => "updated",
            Self::Genres => "genres",
        }
    }

    /// Regions whose output depends on this attribute
    ///
    /// The title also feeds the image alt text.
    #[must_use]
    pub fn regions(&self) -> &'static [CardRegion] {
        match self {
            Self::Title => &[CardRegion::Title, CardRegion::Image],
            Self::Image => &[CardRegion::Image],
            Self::Seasons => &[CardRegion::Seasons],
            Self::Updated => &[CardRegion::Updated],
            Self::Genres => &[CardRegion::Genres],
        }
    }
}

impl fmt::Display for CardAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WATCHED
            .iter()
            .copied()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| format!("not a watched attribute: {s}"))
    }
}

/// Current values of a card's declared attributes
///
/// `None` means the attribute is absent, which is distinct from an empty
/// string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardViewState {
    /// `title` attribute
    pub title: Option<String>,
    /// `image` attribute
    pub image: Option<String>,
    /// `seasons` attribute
    pub seasons: Option<String>,
    /// `updated` attribute
    pub updated: Option<String>,
    /// `genres` attribute
    pub genres: Option<String>,
}

impl CardViewState {
    /// Value of an attribute, if present
    #[must_use]
    pub fn get(&self, attr: CardAttribute) -> Option<&str> {
        self.slot(attr).as_deref()
    }

    fn slot(&self, attr: CardAttribute) -> &Option<String> {
        match attr {
            CardAttribute::Title => &self.title,
            CardAttribute::Image => &self.image,
            CardAttribute::Seasons => &self.seasons,
            CardAttribute::Updated => &self.updated,
            CardAttribute::Genres => &self.genres,
        }
    }

    pub(super) fn slot_mut(&mut self, attr: CardAttribute) -> &mut Option<String> {
        match attr {
            CardAttribute::Title => &mut self.title,
            CardAttribute::Image => &mut self.image,
            CardAttribute::Seasons => &mut self.seasons,
            CardAttribute::Updated => &mut self.updated,
            CardAttribute::Genres => &mut self.genres,
        }
    }

    /// Attributes that are currently absent
    #[must_use]
    pub fn missing(&self) -> Vec<CardAttribute> {
        WATCHED
            .iter()
            .copied()
            .filter(|attr| self.slot(*attr).is_none())
            .collect()
    }
}
