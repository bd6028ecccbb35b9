//! Card Events
//!
//! The selection event is the only output of a [`PreviewCard`]. It carries a
//! lightweight snapshot of the card's attributes, not the canonical record:
//! consumers recover the record by `id`.
//!
//! [`PreviewCard`]: crate::card::PreviewCard

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Name of the selection event
pub const EVENT_NAME: &str = "podcastSelected";

/// Payload of a selection event, copied from the card's attributes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastSelected {
    /// The card's element id (the podcast id)
    pub id: String,
    /// `title` attribute
    pub title: Option<String>,
    /// `image` attribute
    pub image: Option<String>,
    /// `seasons` attribute, as sent
    pub seasons: Option<String>,
    /// `updated` attribute
    pub updated: Option<String>,
    /// `genres` attribute, as sent (comma-joined ids)
    pub genres: Option<String>,
}

impl PodcastSelected {
    /// Selection events propagate past the card to its container
    pub const BUBBLES: bool = true;
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a new unique listener id
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback invoked for every selection event a card dispatches
pub type SelectionListener = Box<dyn FnMut(&PodcastSelected)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }

    #[test]
    fn test_payload_serializes_missing_attributes_as_null() {
        let payload = PodcastSelected {
            id: "42".to_string(),
            title: Some("X".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["id"], "42");
        assert!(value["image"].is_null());
    }
}
