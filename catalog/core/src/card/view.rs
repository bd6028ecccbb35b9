//! Card rendering scope
//!
//! [`CardView`] is the private rendered output of one card: each region is
//! derived from the attributes alone, through the [`RENDERERS`] table. Only
//! the owning card can write into it; everything else gets read access.
//!
//! Changed regions are collected in a [`RegionSet`] so a surface can redraw
//! just those parts, the same way a dirty tracker limits repaint work.

use super::attributes::{CardAttribute, CardViewState};
use crate::dates::DateFormatter;
use crate::genres;

/// A separately rendered part of a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardRegion {
    /// Cover image source and alt text
    Image,
    /// Title heading
    Title,
    /// Season count line
    Seasons,
    /// Genre tags
    Genres,
    /// Updated-date line
    Updated,
}

impl CardRegion {
    /// All regions in layout order
    pub const ALL: [CardRegion; 5] = [
        CardRegion::Image,
        CardRegion::Title,
        CardRegion::Seasons,
        CardRegion::Genres,
        CardRegion::Updated,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Image => 1,
            Self::Title => 1 << 1,
            Self::Seasons => 1 << 2,
            Self::Genres => 1 << 3,
            Self::Updated => 1 << 4,
        }
    }
}

/// Set of card regions (dirty marks)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionSet(u8);

impl RegionSet {
    /// No regions
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every region
    #[must_use]
    pub fn all() -> Self {
        CardRegion::ALL
            .iter()
            .fold(Self::empty(), |set, region| set.with(*region))
    }

    /// Add a region
    pub fn insert(&mut self, region: CardRegion) {
        self.0 |= region.bit();
    }

    /// Copy with a region added
    #[must_use]
    pub const fn with(self, region: CardRegion) -> Self {
        Self(self.0 | region.bit())
    }

    /// Whether the region is in the set
    #[must_use]
    pub const fn contains(&self, region: CardRegion) -> bool {
        self.0 & region.bit() != 0
    }

    /// Whether the set is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Regions in the set, in layout order
    pub fn iter(&self) -> impl Iterator<Item = CardRegion> + '_ {
        CardRegion::ALL
            .into_iter()
            .filter(move |region| self.contains(*region))
    }
}

/// Rendered output of a card
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardView {
    image_src: Option<String>,
    image_alt: String,
    title: String,
    seasons: String,
    genres: Vec<String>,
    updated: String,
}

impl CardView {
    /// Cover image URI, if an image is set
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    /// Cover image alt text
    #[must_use]
    pub fn image_alt(&self) -> &str {
        &self.image_alt
    }

    /// Title text
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Season count text (`"3 seasons"`)
    #[must_use]
    pub fn seasons(&self) -> &str {
        &self.seasons
    }

    /// Genre tag labels, in order
    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Updated-date text
    #[must_use]
    pub fn updated(&self) -> &str {
        &self.updated
    }
}

/// Renders one region from the attribute snapshot; returns whether it changed
pub(super) type RegionRenderer = fn(&mut CardView, &CardViewState, &DateFormatter) -> bool;

/// Region → render function table
pub(super) const RENDERERS: [(CardRegion, RegionRenderer); 5] = [
    (CardRegion::Image, render_image),
    (CardRegion::Title, render_title),
    (CardRegion::Seasons, render_seasons),
    (CardRegion::Genres, render_genres),
    (CardRegion::Updated, render_updated),
];

pub(super) fn renderer_for(region: CardRegion) -> RegionRenderer {
    RENDERERS
        .iter()
        .find(|(r, _)| *r == region)
        .map_or(render_noop as RegionRenderer, |(_, f)| *f)
}

fn render_noop(_: &mut CardView, _: &CardViewState, _: &DateFormatter) -> bool {
    false
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn render_image(view: &mut CardView, attrs: &CardViewState, _: &DateFormatter) -> bool {
    let (src, alt) = match attrs.get(CardAttribute::Image) {
        Some(src) => {
            let title = attrs
                .get(CardAttribute::Title)
                .filter(|t| !t.is_empty())
                .unwrap_or("Podcast");
            (Some(src.to_string()), format!("{title} cover"))
        }
        None => (None, String::new()),
    };
    let src_changed = replace(&mut view.image_src, src);
    let alt_changed = replace(&mut view.image_alt, alt);
    src_changed || alt_changed
}

fn render_title(view: &mut CardView, attrs: &CardViewState, _: &DateFormatter) -> bool {
    let title = attrs.get(CardAttribute::Title).unwrap_or_default().to_string();
    replace(&mut view.title, title)
}

fn render_seasons(view: &mut CardView, attrs: &CardViewState, _: &DateFormatter) -> bool {
    let text = attrs
        .get(CardAttribute::Seasons)
        .map(seasons_text)
        .unwrap_or_default();
    replace(&mut view.seasons, text)
}

fn render_genres(view: &mut CardView, attrs: &CardViewState, _: &DateFormatter) -> bool {
    let tags = attrs
        .get(CardAttribute::Genres)
        .map(|encoded| {
            genres::resolve_encoding(encoded)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    replace(&mut view.genres, tags)
}

fn render_updated(view: &mut CardView, attrs: &CardViewState, formatter: &DateFormatter) -> bool {
    let text = attrs
        .get(CardAttribute::Updated)
        .map(|iso| formatter.format(iso))
        .unwrap_or_default();
    replace(&mut view.updated, text)
}

/// Season count text: singular only for exactly one
#[must_use]
pub fn seasons_text(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match raw.parse::<u64>() {
        Ok(1) => "1 season".to_string(),
        Ok(n) => format!("{n} seasons"),
        Err(_) => format!("{raw} seasons"),
    }
}
