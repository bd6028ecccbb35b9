//! Preview Card
//!
//! A self-contained visual unit for one podcast. Everything it shows is a
//! pure function of five declared string attributes; setting an attribute
//! re-renders only the regions that depend on it.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──set_attribute()*──► connect() ──activate()──► PodcastSelected
//!                                   │                          │
//!                                   │                     listeners
//!                              disconnect()
//!                                   │
//!                          activate() is ignored
//! ```
//!
//! The card never knows who listens. Its container subscribes through
//! [`PreviewCard::subscribe`] and is handed a [`PodcastSelected`] snapshot;
//! recovering the canonical record is the container's job.

mod attributes;
mod view;

use std::cell::RefCell;
use std::rc::Rc;

pub use attributes::{CardAttribute, CardViewState, WATCHED};
pub use view::{seasons_text, CardRegion, CardView, RegionSet};

use crate::dates::{parse_iso, DateFormatter};
use crate::error::RenderFallback;
use crate::events::{ListenerId, PodcastSelected, SelectionListener};
use crate::genres::{parse_encoding, GenreResolver, GenreToken};

/// Shared handle to a card owned by a container
pub type CardHandle = Rc<RefCell<PreviewCard>>;

/// Attribute-driven podcast preview card
pub struct PreviewCard {
    /// Element id (the podcast id)
    id: String,
    /// Declared attribute values
    attributes: CardViewState,
    /// Rendered output (private scope)
    view: CardView,
    /// Formatter shared with the modal
    formatter: DateFormatter,
    /// Whether the card is attached and listening for activation
    connected: bool,
    /// Selection observers
    listeners: Vec<(ListenerId, SelectionListener)>,
    /// Regions changed since the last `take_dirty`
    dirty: RegionSet,
}

impl PreviewCard {
    /// Create a detached card with empty regions
    #[must_use]
    pub fn new(formatter: DateFormatter) -> Self {
        Self {
            id: String::new(),
            attributes: CardViewState::default(),
            view: CardView::default(),
            formatter,
            connected: false,
            listeners: Vec::new(),
            dirty: RegionSet::empty(),
        }
    }

    /// Wrap in a shared handle
    #[must_use]
    pub fn into_handle(self) -> CardHandle {
        Rc::new(RefCell::new(self))
    }

    /// Element id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the element id (carried in selection payloads)
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Current value of an attribute
    #[must_use]
    pub fn attribute(&self, attr: CardAttribute) -> Option<&str> {
        self.attributes.get(attr)
    }

    /// Set an attribute, re-rendering the regions that depend on it
    ///
    /// Setting an attribute to its current value does nothing. Returns
    /// whether the stored value changed.
    pub fn set_attribute(&mut self, attr: CardAttribute, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = self.attributes.slot_mut(attr);
        if slot.as_deref() == Some(value.as_str()) {
            tracing::trace!(card = %self.id, attribute = %attr, "Attribute unchanged");
            return false;
        }
        *slot = Some(value);
        self.attribute_changed(attr);
        true
    }

    /// Remove an attribute; its regions render empty
    ///
    /// Returns whether the attribute was present.
    pub fn remove_attribute(&mut self, attr: CardAttribute) -> bool {
        if self.attributes.slot_mut(attr).take().is_none() {
            return false;
        }
        self.attribute_changed(attr);
        true
    }

    fn attribute_changed(&mut self, attr: CardAttribute) {
        for region in attr.regions() {
            self.render_region(*region);
        }
        tracing::trace!(card = %self.id, attribute = %attr, dirty = ?self.dirty, "Attribute changed");
    }

    fn render_region(&mut self, region: CardRegion) {
        let render = view::renderer_for(region);
        if render(&mut self.view, &self.attributes, &self.formatter) {
            self.dirty.insert(region);
        }
    }

    fn render_all(&mut self) {
        for region in CardRegion::ALL {
            self.render_region(region);
        }
    }

    /// Snapshot of the declared attributes
    #[must_use]
    pub fn view_state(&self) -> CardViewState {
        self.attributes.clone()
    }

    /// Rendered output
    #[must_use]
    pub fn view(&self) -> &CardView {
        &self.view
    }

    /// Date formatter this card renders with
    #[must_use]
    pub fn formatter(&self) -> DateFormatter {
        self.formatter
    }

    /// Attach the card: render everything and start handling activation
    pub fn connect(&mut self) {
        if self.connected {
            return;
        }
        self.connected = true;
        self.render_all();

        for fallback in self.diagnose() {
            tracing::debug!(card = %self.id, %fallback, "Card rendered with fallback");
        }
    }

    /// Detach the card: activation is ignored from now on
    pub fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            tracing::trace!(card = %self.id, "Card disconnected");
        }
    }

    /// Whether the card is attached
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Register a selection listener
    pub fn subscribe(&mut self, listener: impl FnMut(&PodcastSelected) + 'static) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a selection listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Number of registered selection listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Build the selection payload from the current attributes
    #[must_use]
    pub fn selection_payload(&self) -> PodcastSelected {
        PodcastSelected {
            id: self.id.clone(),
            title: self.attributes.title.clone(),
            image: self.attributes.image.clone(),
            seasons: self.attributes.seasons.clone(),
            updated: self.attributes.updated.clone(),
            genres: self.attributes.genres.clone(),
        }
    }

    /// Deliver a user activation (click / Enter)
    ///
    /// A connected card dispatches one [`PodcastSelected`] event to every
    /// listener. A detached card ignores the gesture. Returns whether an
    /// event was dispatched.
    pub fn activate(&mut self) -> bool {
        if !self.connected {
            tracing::debug!(card = %self.id, "Activation on detached card ignored");
            return false;
        }

        let payload = self.selection_payload();
        tracing::debug!(card = %self.id, listeners = self.listeners.len(), "Dispatching selection");
        for (_, listener) in &mut self.listeners {
            listener(&payload);
        }
        true
    }

    /// Regions changed since the last [`take_dirty`](Self::take_dirty)
    #[must_use]
    pub fn dirty_regions(&self) -> RegionSet {
        self.dirty
    }

    /// Return and clear the dirty regions
    pub fn take_dirty(&mut self) -> RegionSet {
        std::mem::take(&mut self.dirty)
    }

    /// Conditions the current render is falling back on
    #[must_use]
    pub fn diagnose(&self) -> Vec<RenderFallback> {
        let mut fallbacks: Vec<RenderFallback> = self
            .attributes
            .missing()
            .into_iter()
            .map(RenderFallback::MissingAttribute)
            .collect();

        if let Some(encoded) = self.attributes.get(CardAttribute::Genres) {
            let resolver = GenreResolver::shared();
            for token in parse_encoding(encoded) {
                match token {
                    GenreToken::Id(id) if !resolver.is_known(id) => {
                        fallbacks.push(RenderFallback::UnresolvedGenre(id));
                    }
                    GenreToken::Malformed(raw) => {
                        fallbacks.push(RenderFallback::MalformedGenreToken(raw));
                    }
                    GenreToken::Id(_) => {}
                }
            }
        }

        if let Some(updated) = self.attributes.get(CardAttribute::Updated) {
            if parse_iso(updated).is_err() {
                fallbacks.push(RenderFallback::MalformedDate(updated.to_string()));
            }
        }

        fallbacks
    }
}

impl Default for PreviewCard {
    fn default() -> Self {
        Self::new(DateFormatter::calendar())
    }
}

impl std::fmt::Debug for PreviewCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCard")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("connected", &self.connected)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::INVALID_DATE_TEXT;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn connected_card() -> PreviewCard {
        let mut card = PreviewCard::default();
        card.set_id("42");
        card.set_attribute(CardAttribute::Title, "X");
        card.set_attribute(CardAttribute::Image, "https://example.com/x.png");
        card.set_attribute(CardAttribute::Seasons, "2");
        card.set_attribute(CardAttribute::Updated, "2023-01-15T00:00:00Z");
        card.set_attribute(CardAttribute::Genres, "3,1");
        card.connect();
        card
    }

    #[test]
    fn test_new_card_has_empty_regions() {
        let card = PreviewCard::default();
        assert_eq!(card.view(), &CardView::default());
        assert!(!card.is_connected());
        assert_eq!(card.view_state(), CardViewState::default());
    }

    #[test]
    fn test_renders_all_regions() {
        let card = connected_card();
        let view = card.view();
        assert_eq!(view.title(), "X");
        assert_eq!(view.image_src(), Some("https://example.com/x.png"));
        assert_eq!(view.image_alt(), "X cover");
        assert_eq!(view.seasons(), "2 seasons");
        assert_eq!(view.genres(), &["History".to_string(), "Personal Growth".to_string()]);
        assert_eq!(view.updated(), "Updated January 15, 2023");
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut card = connected_card();
        card.take_dirty();
        let before = card.view().clone();

        assert!(!card.set_attribute(CardAttribute::Title, "X"));
        assert!(!card.set_attribute(CardAttribute::Genres, "3,1"));

        assert_eq!(card.view(), &before);
        assert!(card.dirty_regions().is_empty());
    }

    #[test]
    fn test_change_rerenders_only_dependent_regions() {
        let mut card = connected_card();
        card.take_dirty();

        assert!(card.set_attribute(CardAttribute::Seasons, "1"));
        let dirty = card.take_dirty();
        assert!(dirty.contains(CardRegion::Seasons));
        assert!(!dirty.contains(CardRegion::Title));
        assert!(!dirty.contains(CardRegion::Genres));
        assert_eq!(card.view().seasons(), "1 season");

        card.set_attribute(CardAttribute::Title, "Y");
        let dirty = card.take_dirty();
        assert!(dirty.contains(CardRegion::Title));
        assert!(dirty.contains(CardRegion::Image));
        assert_eq!(card.view().image_alt(), "Y cover");
    }

    #[test]
    fn test_empty_to_non_empty_counts_as_change() {
        let mut card = PreviewCard::default();
        assert!(card.set_attribute(CardAttribute::Title, ""));
        assert!(card.set_attribute(CardAttribute::Title, "Now"));
        assert_eq!(card.view().title(), "Now");
    }

    #[test]
    fn test_genres_keep_order_and_duplicates() {
        let mut card = PreviewCard::default();
        card.set_attribute(CardAttribute::Genres, "3,1,3");
        assert_eq!(card.view().genres(), &["History", "Personal Growth", "History"]);
    }

    #[test]
    fn test_unknown_and_malformed_genres() {
        let mut card = PreviewCard::default();
        card.set_attribute(CardAttribute::Genres, "99");
        assert_eq!(card.view().genres(), &["Unknown"]);

        card.set_attribute(CardAttribute::Genres, "4,abc,2");
        assert_eq!(
            card.view().genres(),
            &["Comedy", "Unknown", "Investigative Journalism"]
        );
    }

    #[test]
    fn test_missing_updated_leaves_date_empty() {
        let mut card = PreviewCard::default();
        card.set_attribute(CardAttribute::Title, "No date");
        card.connect();
        assert_eq!(card.view().updated(), "");
        assert!(card
            .diagnose()
            .contains(&RenderFallback::MissingAttribute(CardAttribute::Updated)));
    }

    #[test]
    fn test_remove_attribute_clears_region() {
        let mut card = connected_card();
        assert!(card.remove_attribute(CardAttribute::Genres));
        assert!(card.view().genres().is_empty());
        assert!(!card.remove_attribute(CardAttribute::Genres));
    }

    #[test]
    fn test_malformed_date_renders_fallback() {
        let mut card = PreviewCard::default();
        card.set_attribute(CardAttribute::Updated, "not-a-date");
        assert_eq!(card.view().updated(), INVALID_DATE_TEXT);
        assert!(card
            .diagnose()
            .contains(&RenderFallback::MalformedDate("not-a-date".to_string())));
    }

    #[test]
    fn test_activate_emits_payload() {
        let mut card = connected_card();
        let seen: Rc<RefCell<Vec<PodcastSelected>>> = Rc::default();
        let sink = Rc::clone(&seen);
        card.subscribe(move |payload| sink.borrow_mut().push(payload.clone()));

        assert!(card.activate());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, "42");
        assert_eq!(seen[0].title.as_deref(), Some("X"));
        assert_eq!(seen[0].seasons.as_deref(), Some("2"));
        assert_eq!(seen[0].genres.as_deref(), Some("3,1"));
    }

    #[test]
    fn test_detached_card_does_not_emit() {
        let mut card = connected_card();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        card.subscribe(move |_| counter.set(counter.get() + 1));

        card.disconnect();
        assert!(!card.activate());
        assert_eq!(count.get(), 0);

        card.connect();
        assert!(card.activate());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut card = connected_card();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = card.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(card.unsubscribe(id));
        assert!(!card.unsubscribe(id));
        assert_eq!(card.listener_count(), 0);
        card.activate();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut card = connected_card();
        card.take_dirty();
        card.connect();
        assert!(card.dirty_regions().is_empty());
    }
}
