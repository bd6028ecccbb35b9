//! Card Grid
//!
//! Owns the visible collection of preview cards and mediates between catalog
//! data and the cards.
//!
//! [`Grid::render`] is a total replacement: every existing card is detached
//! and dropped, then one card per record is built in input order. There is
//! no diffing; re-rendering the same list produces an equal, fresh grid.
//!
//! Each card's selection event carries only an attribute snapshot. The grid's
//! listener resolves the payload id against the id index of the current
//! render pass and forwards the canonical record to the shared modal.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use crate::card::{CardAttribute, CardHandle, PreviewCard};
use crate::dates::DateFormatter;
use crate::events::{ListenerId, PodcastSelected};
use crate::genres;
use crate::modal::SharedModal;
use crate::podcast::{PodcastId, PodcastRecord};

type RecordIndex = HashMap<PodcastId, Rc<PodcastRecord>>;

/// A mounted card and the grid's subscription on it
struct Slot {
    card: CardHandle,
    listener: ListenerId,
}

/// The podcast card grid
pub struct Grid {
    /// Cards in display order
    container: Vec<Slot>,
    /// Canonical records of the current render, by id
    index: Rc<RecordIndex>,
    /// Overlay that selections open
    modal: SharedModal,
    /// Formatter handed to every card
    formatter: DateFormatter,
    /// Number of completed render passes
    renders: u64,
}

impl Grid {
    /// Create an empty grid wired to the given modal
    #[must_use]
    pub fn new(modal: SharedModal, formatter: DateFormatter) -> Self {
        Self {
            container: Vec::new(),
            index: Rc::new(RecordIndex::new()),
            modal,
            formatter,
            renders: 0,
        }
    }

    /// Replace the grid contents with one card per record, in order
    pub fn render(&mut self, podcasts: &[PodcastRecord]) {
        self.clear();

        let mut index = RecordIndex::with_capacity(podcasts.len());
        for record in podcasts {
            match index.entry(record.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Rc::new(record.clone()));
                }
                Entry::Occupied(_) => {
                    tracing::warn!(id = %record.id, "Duplicate podcast id; first record wins");
                }
            }
        }
        self.index = Rc::new(index);

        for record in podcasts {
            let slot = self.mount(record);
            self.container.push(slot);
        }

        self.renders += 1;
        tracing::info!(cards = self.container.len(), pass = self.renders, "Grid rendered");
    }

    fn mount(&self, record: &PodcastRecord) -> Slot {
        let mut card = PreviewCard::new(self.formatter);
        card.set_id(record.id.as_str());
        card.set_attribute(CardAttribute::Title, record.title.as_str());
        card.set_attribute(CardAttribute::Image, record.image.as_str());
        card.set_attribute(CardAttribute::Seasons, record.seasons.to_string());
        card.set_attribute(CardAttribute::Updated, record.updated.as_str());
        card.set_attribute(CardAttribute::Genres, genres::encode(&record.genres));

        let index = Rc::clone(&self.index);
        let modal = Rc::clone(&self.modal);
        let listener = card.subscribe(move |payload| forward_selection(&index, &modal, payload));

        card.connect();
        Slot {
            card: card.into_handle(),
            listener,
        }
    }

    /// Detach and drop every card
    pub fn clear(&mut self) {
        for slot in self.container.drain(..) {
            match slot.card.try_borrow_mut() {
                Ok(mut card) => {
                    card.unsubscribe(slot.listener);
                    card.disconnect();
                }
                Err(_) => {
                    tracing::warn!("Card busy during teardown; dropping without detach");
                }
            }
        }
    }

    /// Number of cards
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Whether the grid has no cards
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Card at a display position
    #[must_use]
    pub fn card(&self, index: usize) -> Option<CardHandle> {
        self.container.get(index).map(|slot| Rc::clone(&slot.card))
    }

    /// Cards in display order
    pub fn cards(&self) -> impl Iterator<Item = &CardHandle> + '_ {
        self.container.iter().map(|slot| &slot.card)
    }

    /// Canonical record for an id in the current render
    #[must_use]
    pub fn record(&self, id: &str) -> Option<&PodcastRecord> {
        self.index.get(id).map(|record| &**record)
    }

    /// Deliver an activation gesture to the card at `index`
    ///
    /// Returns whether a selection event was dispatched.
    pub fn activate(&self, index: usize) -> bool {
        let Some(slot) = self.container.get(index) else {
            return false;
        };
        slot.card.borrow_mut().activate()
    }

    /// Whether any card changed since the last call; clears the marks
    pub fn take_dirty(&self) -> bool {
        self.container
            .iter()
            .fold(false, |dirty, slot| !slot.card.borrow_mut().take_dirty().is_empty() || dirty)
    }

    /// The modal selections open
    #[must_use]
    pub fn modal(&self) -> SharedModal {
        Rc::clone(&self.modal)
    }

    /// Number of completed render passes
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

impl Drop for Grid {
    fn drop(&mut self) {
        self.clear();
    }
}

fn forward_selection(index: &RecordIndex, modal: &SharedModal, payload: &PodcastSelected) {
    match index.get(payload.id.as_str()) {
        Some(record) => modal.borrow_mut().open(record),
        None => tracing::warn!(id = %payload.id, "Selected podcast is not in the catalog"),
    }
}
