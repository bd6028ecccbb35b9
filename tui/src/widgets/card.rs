//! Card Widget
//!
//! Draws one [`CardView`] as a bordered cell:
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ ▣ Something Was Wrong cover  │
//! │ Something Was Wrong          │
//! │ 14 seasons                   │
//! │ Personal Growth · History    │
//! │ Updated November 3, 2022     │
//! ╰──────────────────────────────╯
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use catalog_core::CardView;

use super::{draw_border, truncate};
use crate::theme;

/// Separator between genre tags
pub const TAG_SEPARATOR: &str = " · ";

/// A preview card cell
pub struct CardWidget<'a> {
    view: &'a CardView,
    focused: bool,
}

impl<'a> CardWidget<'a> {
    /// Draw `view`
    pub fn new(view: &'a CardView) -> Self {
        Self {
            view,
            focused: false,
        }
    }

    /// Highlight as the keyboard focus
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 6 || area.height < 3 {
            return;
        }

        let border = if self.focused {
            Style::default()
                .fg(theme::CARD_BORDER_FOCUSED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::CARD_BORDER)
        };
        draw_border(buf, area, border, None);

        let x = area.x + 2;
        let width = usize::from(area.width.saturating_sub(4));
        let bottom = area.y + area.height.saturating_sub(1);

        let cover_icon = if self.view.image_src().is_some() { "▣" } else { "▢" };
        let lines = [
            (
                format!("{cover_icon} {}", self.view.image_alt()),
                Style::default().fg(theme::COVER),
            ),
            (
                self.view.title().to_string(),
                Style::default()
                    .fg(theme::TITLE)
                    .add_modifier(Modifier::BOLD),
            ),
            (
                self.view.seasons().to_string(),
                Style::default().fg(theme::SEASONS),
            ),
            (
                self.view.genres().join(TAG_SEPARATOR),
                Style::default().fg(theme::GENRE_TAG),
            ),
            (
                self.view.updated().to_string(),
                Style::default().fg(theme::DIM_GRAY),
            ),
        ];

        for (y, (text, style)) in (area.y + 1..bottom).zip(lines.iter()) {
            buf.set_string(x, y, truncate(text, width), *style);
        }
    }
}
