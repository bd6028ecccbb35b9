//! Detail Modal
//!
//! The single shared overlay showing the full record of one podcast.
//! [`Modal::open`] is the only operation that writes content; [`Modal::close`]
//! only hides it, so the last projection stays readable until the next open.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dates::DateFormatter;
use crate::genres::GenreResolver;
use crate::podcast::PodcastRecord;

/// Shared handle to the session's modal
pub type SharedModal = Rc<RefCell<Modal>>;

/// One line of the season list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeasonLine {
    /// `"Season {n}: {title}"`
    pub label: String,
    /// `"{episodes} episodes"`
    pub episodes: String,
}

/// Rendered content of the modal
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalView {
    image: String,
    title: String,
    description: String,
    genres: Vec<String>,
    updated: String,
    seasons: Vec<SeasonLine>,
}

impl ModalView {
    /// Cover image URI
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Genre tags in order
    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Formatted updated date
    #[must_use]
    pub fn updated(&self) -> &str {
        &self.updated
    }

    /// Season list in order
    #[must_use]
    pub fn seasons(&self) -> &[SeasonLine] {
        &self.seasons
    }
}

/// Detail overlay
#[derive(Debug)]
pub struct Modal {
    view: ModalView,
    current: Option<PodcastRecord>,
    visible: bool,
    formatter: DateFormatter,
}

impl Modal {
    /// Create a hidden, empty modal
    #[must_use]
    pub fn new(formatter: DateFormatter) -> Self {
        Self {
            view: ModalView::default(),
            current: None,
            visible: false,
            formatter,
        }
    }

    /// Wrap in a shared handle
    #[must_use]
    pub fn shared(formatter: DateFormatter) -> SharedModal {
        Rc::new(RefCell::new(Self::new(formatter)))
    }

    /// Project a record into the overlay and show it
    pub fn open(&mut self, record: &PodcastRecord) {
        self.update_content(record);
        self.current = Some(record.clone());
        self.visible = true;
        tracing::debug!(podcast = %record.id, "Modal opened");
    }

    fn update_content(&mut self, record: &PodcastRecord) {
        let genres = GenreResolver::shared()
            .resolve_names(&record.genres)
            .into_iter()
            .map(str::to_string)
            .collect();

        let seasons = record
            .season_details
            .iter()
            .enumerate()
            .map(|(index, season)| SeasonLine {
                label: format!("Season {}: {}", index + 1, season.title),
                episodes: format!("{} episodes", season.episodes),
            })
            .collect();

        self.view = ModalView {
            image: record.image.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            genres,
            updated: self.formatter.format(&record.updated),
            seasons,
        };
    }

    /// Hide the overlay; content is kept
    pub fn close(&mut self) {
        if self.visible {
            self.visible = false;
            tracing::debug!("Modal closed");
        }
    }

    /// Whether the overlay is shown
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last projected content
    #[must_use]
    pub fn view(&self) -> &ModalView {
        &self.view
    }

    /// Record most recently opened
    #[must_use]
    pub fn current(&self) -> Option<&PodcastRecord> {
        self.current.as_ref()
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new(DateFormatter::calendar())
    }
}
