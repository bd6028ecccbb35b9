//! Catalog Core - Headless Podcast Catalog Components
//!
//! This crate holds the component and state-synchronisation logic of the
//! podcast catalog, independent of any UI framework. A surface (the terminal
//! UI in this workspace, or a test harness) drives it and draws what it
//! exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │             (ratatui TUI, tests, headless tools)              │
//! └───────────────┬──────────────────────────────┬───────────────┘
//!                 │ activate / close              │ read views
//! ┌───────────────┴──────────────────────────────┴───────────────┐
//! │                        CATALOG CORE                           │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                     CatalogView                         │  │
//! │  │   ┌──────────────┐   selection    ┌──────────────────┐ │  │
//! │  │   │     Grid     │ ─────────────▶ │      Modal       │ │  │
//! │  │   │ PreviewCard* │                │  (shared, one)   │ │  │
//! │  │   └──────────────┘                └──────────────────┘ │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │   GenreResolver · DateFormatter · PodcastSource · Config      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`PreviewCard`]: attribute-driven card for one podcast
//! - [`Grid`]: owns the cards, rebuilt on every render
//! - [`Modal`]: the single detail overlay
//! - [`CatalogView`]: session root applying data-source results
//! - [`PodcastSource`]: where the podcast list comes from
//!
//! # Quick Start
//!
//! ```ignore
//! use catalog_core::{config::load_config, CatalogView};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let source = config.build_source()?;
//!     let mut view = CatalogView::new(config.formatter());
//!
//!     view.apply(source.fetch().await);
//!     view.grid().activate(0);
//!
//!     let modal = view.modal();
//!     println!("{}", modal.borrow().view().title());
//!     Ok(())
//! }
//! ```
//!
//! # No UI Dependencies
//!
//! This crate has no dependency on ratatui, crossterm, or any other UI
//! framework. Cards and modal expose plain view structs.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod card;
pub mod config;
pub mod dates;
pub mod error;
pub mod events;
pub mod genres;
pub mod grid;
pub mod modal;
pub mod podcast;
pub mod source;
pub mod view;

pub use card::{CardAttribute, CardHandle, CardRegion, CardView, CardViewState, PreviewCard};
pub use config::{CatalogConfig, ConfigError, ConfigOverrides, ConfigSource};
pub use dates::{DateFormatter, DateStyle};
pub use error::{RenderFallback, SourceError};
pub use events::{ListenerId, PodcastSelected};
pub use genres::GenreResolver;
pub use grid::Grid;
pub use modal::{Modal, ModalView, SeasonLine, SharedModal};
pub use podcast::{PodcastId, PodcastRecord, SeasonDetail};
pub use source::{FileSource, HttpSource, PodcastSource, StaticSource, WithSeasons};
pub use view::{CatalogView, LoadOutcome};
