//! Catalog View
//!
//! Session root tying the grid and the shared modal together, and the place
//! where data-source results land. A failed load is surfaced as a message
//! and never touches what is already on screen.

use std::rc::Rc;

use crate::dates::DateFormatter;
use crate::error::SourceError;
use crate::grid::Grid;
use crate::modal::{Modal, SharedModal};
use crate::podcast::PodcastRecord;

/// Outcome of applying a data-source result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Grid was rebuilt with this many cards
    Rendered(usize),
    /// Load failed; previous state kept
    Failed,
}

/// Grid + modal for one session
pub struct CatalogView {
    grid: Grid,
    modal: SharedModal,
    formatter: DateFormatter,
    error: Option<String>,
    loaded: usize,
}

impl CatalogView {
    /// Create an empty view; cards and modal share `formatter`
    #[must_use]
    pub fn new(formatter: DateFormatter) -> Self {
        let modal = Modal::shared(formatter);
        let grid = Grid::new(Rc::clone(&modal), formatter);
        Self {
            grid,
            modal,
            formatter,
            error: None,
            loaded: 0,
        }
    }

    /// Apply a fetch result
    ///
    /// Success rebuilds the grid and clears any previous error. Failure
    /// records the user-facing message and leaves grid and modal untouched.
    pub fn apply(&mut self, result: Result<Vec<PodcastRecord>, SourceError>) -> LoadOutcome {
        match result {
            Ok(podcasts) => {
                self.grid.render(&podcasts);
                self.loaded = podcasts.len();
                self.error = None;
                LoadOutcome::Rendered(self.loaded)
            }
            Err(err) => {
                tracing::error!(error = %err, "Error fetching podcasts");
                self.error = Some(err.user_message().to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// User-facing message of the last failed load, if it was not superseded
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of records in the last successful load
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// The grid
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The grid, mutably
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Shared handle to the modal
    #[must_use]
    pub fn modal(&self) -> SharedModal {
        Rc::clone(&self.modal)
    }

    /// Whether the modal is showing
    #[must_use]
    pub fn modal_visible(&self) -> bool {
        self.modal.borrow().is_visible()
    }

    /// Close gesture for the modal
    pub fn close_modal(&self) {
        self.modal.borrow_mut().close();
    }

    /// The formatter shared by cards and modal
    #[must_use]
    pub fn formatter(&self) -> DateFormatter {
        self.formatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn podcasts() -> Vec<PodcastRecord> {
        vec![
            PodcastRecord::new("1", "One", "", 1, "2023-01-01", vec![1]),
            PodcastRecord::new("2", "Two", "", 2, "2023-01-02", vec![2]),
        ]
    }

    #[test]
    fn test_apply_success_renders() {
        let mut view = CatalogView::new(DateFormatter::calendar());
        assert_eq!(view.apply(Ok(podcasts())), LoadOutcome::Rendered(2));
        assert_eq!(view.grid().len(), 2);
        assert_eq!(view.loaded(), 2);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_apply_failure_keeps_previous_state() {
        let mut view = CatalogView::new(DateFormatter::calendar());
        view.apply(Ok(podcasts()));
        view.grid().activate(0);

        let outcome = view.apply(Err(SourceError::Status { status: 500 }));

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(
            view.error(),
            Some("Failed to load podcasts. Please try again later.")
        );
        assert_eq!(view.grid().len(), 2);
        assert!(view.grid().card(0).unwrap().borrow().is_connected());
        assert!(view.modal_visible());
    }

    #[test]
    fn test_successful_reload_clears_error() {
        let mut view = CatalogView::new(DateFormatter::calendar());
        view.apply(Err(SourceError::Transport("offline".to_string())));
        assert!(view.error().is_some());
        view.apply(Ok(podcasts()));
        assert!(view.error().is_none());
    }

    #[test]
    fn test_close_modal() {
        let mut view = CatalogView::new(DateFormatter::calendar());
        view.apply(Ok(podcasts()));
        view.grid().activate(1);
        assert!(view.modal_visible());
        view.close_modal();
        assert!(!view.modal_visible());
        assert_eq!(view.modal().borrow().view().title(), "Two");
    }
}
