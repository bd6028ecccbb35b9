//! Modal Widget
//!
//! Draws the detail overlay for the selected podcast: cover, genres,
//! updated date, wrapped description and the season list.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use catalog_core::ModalView;

use super::card::TAG_SEPARATOR;
use super::{clear, draw_border, truncate};
use crate::theme;

const MAX_WIDTH: u16 = 72;
const MAX_HEIGHT: u16 = 24;
const CLOSE_HINT: &str = " Esc to close ";

/// Centered overlay rect for a screen of the given size
pub fn modal_area(screen: Rect) -> Rect {
    let width = screen.width.saturating_sub(4).min(MAX_WIDTH);
    let height = screen.height.saturating_sub(2).min(MAX_HEIGHT);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

/// The podcast detail overlay
pub struct ModalWidget<'a> {
    view: &'a ModalView,
    scroll: usize,
}

impl<'a> ModalWidget<'a> {
    /// Draw `view`
    pub fn new(view: &'a ModalView) -> Self {
        Self { view, scroll: 0 }
    }

    /// Skip the first `scroll` content lines
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Largest useful scroll offset when drawn into `area`
    pub fn max_scroll(&self, area: Rect) -> usize {
        let rows = usize::from(area.height.saturating_sub(2));
        let lines = self.lines(usize::from(area.width.saturating_sub(4)));
        lines.len().saturating_sub(rows)
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(
                truncate(&format!("▣ {}", self.view.image()), width),
                Style::default().fg(theme::COVER),
            ),
            Line::styled(
                truncate(&self.view.genres().join(TAG_SEPARATOR), width),
                Style::default().fg(theme::GENRE_TAG),
            ),
            Line::styled(
                self.view.updated().to_string(),
                Style::default().fg(theme::DIM_GRAY),
            ),
        ];

        if !self.view.description().is_empty() {
            lines.push(Line::default());
            lines.extend(
                textwrap::wrap(self.view.description(), width)
                    .into_iter()
                    .map(|line| Line::styled(line.into_owned(), Style::default().fg(theme::TITLE))),
            );
        }

        if !self.view.seasons().is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled(
                "Seasons",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
            for season in self.view.seasons() {
                let episodes_width = season.episodes.width();
                let label_width = width.saturating_sub(episodes_width + 2);
                let label = truncate(&season.label, label_width);
                let pad = width.saturating_sub(label.width() + episodes_width);
                lines.push(Line::from(vec![
                    Span::styled(label, Style::default().fg(theme::TITLE)),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(season.episodes.clone(), Style::default().fg(theme::EPISODES)),
                ]));
            }
        }

        lines
    }
}

impl Widget for ModalWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 4 {
            return;
        }

        clear(buf, area);
        draw_border(
            buf,
            area,
            Style::default().fg(theme::MODAL_BORDER),
            Some((
                self.view.title(),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
        );

        let hint_width = u16::try_from(CLOSE_HINT.width()).unwrap_or(u16::MAX);
        if area.width > hint_width + 4 {
            buf.set_string(
                area.right() - hint_width - 2,
                area.bottom() - 1,
                CLOSE_HINT,
                Style::default().fg(theme::DIM_GRAY),
            );
        }

        let x = area.x + 2;
        let width = area.width.saturating_sub(4);
        let top = area.y + 1;
        let rows = usize::from(area.height.saturating_sub(2));

        let lines = self.lines(usize::from(width));
        let offset = self.scroll.min(lines.len().saturating_sub(rows));
        let more_above = offset > 0;
        let more_below = lines.len() > offset + rows;
        for (row, line) in lines.iter().skip(offset).take(rows).enumerate() {
            let y = top + u16::try_from(row).unwrap_or(u16::MAX);
            let marker = (more_above && row == 0) || (more_below && row + 1 == rows);
            if marker {
                buf.set_string(x, y, "…", Style::default().fg(theme::DIM_GRAY));
            } else {
                buf.set_line(x, y, line, width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_area_is_centered_and_capped() {
        let area = modal_area(Rect::new(0, 0, 120, 40));
        assert_eq!(area, Rect::new(24, 8, 72, 24));

        let small = modal_area(Rect::new(0, 0, 40, 10));
        assert_eq!(small, Rect::new(2, 1, 36, 8));
    }
}
