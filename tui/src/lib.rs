//! Podcast TUI - Terminal interface for the podcast catalog
//!
//! This crate draws the catalog core's preview cards and detail modal in a
//! full-screen terminal UI.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering (grid, status, modal)
//! - **Layout**: Fixed-size card cells flowing with the terminal width
//! - **Widgets**: Card cells and the detail overlay
//! - **App**: Event loop, focus, background fetches

pub mod app;
pub mod compositor;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use app::App;
