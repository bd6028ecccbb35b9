//! Theme and Colors
//!
//! The catalog palette: warm accents on a dark terminal, with dimmed chrome
//! so cover text and titles carry the eye.

use ratatui::style::Color;

// ============================================================================
// Card Palette
// ============================================================================

/// Card border at rest
pub const CARD_BORDER: Color = Color::Rgb(90, 90, 100);

/// Card border under keyboard focus
pub const CARD_BORDER_FOCUSED: Color = Color::Rgb(255, 176, 90);

/// Podcast title
pub const TITLE: Color = Color::Rgb(240, 240, 240);

/// Cover line (the image stands in as its alt text)
pub const COVER: Color = Color::Rgb(150, 180, 255);

/// Genre tags
pub const GENRE_TAG: Color = Color::Rgb(180, 140, 255);

/// Season count
pub const SEASONS: Color = Color::Rgb(130, 220, 130);

// ============================================================================
// Modal Palette
// ============================================================================

/// Overlay border
pub const MODAL_BORDER: Color = Color::Rgb(255, 176, 90);

/// Episode counts in the season list
pub const EPISODES: Color = Color::Rgb(120, 200, 200);

// ============================================================================
// UI Colors
// ============================================================================

/// Signature accent (headers, hints)
pub const ACCENT: Color = Color::Rgb(255, 176, 90);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);
