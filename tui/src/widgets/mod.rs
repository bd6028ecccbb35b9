//! Widgets
//!
//! Ratatui widgets that draw the core's card and modal views. Widgets only
//! read view structs; all content decisions are made in the core.

mod card;
mod modal;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

pub use card::CardWidget;
pub use modal::{modal_area, ModalWidget};

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Rounded box around `area`, with an optional label set into the top edge
pub(crate) fn draw_border(buf: &mut Buffer, area: Rect, style: Style, label: Option<(&str, Style)>) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let inner = usize::from(area.width.saturating_sub(2));
    let top = format!("╭{}╮", "─".repeat(inner));
    buf.set_string(area.x, area.y, &top, style);

    for y in (area.y + 1)..(area.y + area.height.saturating_sub(1)) {
        buf.set_string(area.x, y, "│", style);
        buf.set_string(area.x + area.width.saturating_sub(1), y, "│", style);
    }

    let bottom = format!("╰{}╯", "─".repeat(inner));
    buf.set_string(area.x, area.y + area.height.saturating_sub(1), &bottom, style);

    if let Some((label, label_style)) = label {
        let label = truncate(&format!(" {label} "), inner.saturating_sub(2));
        buf.set_string(area.x + 2, area.y, &label, label_style);
    }
}

/// Fill `area` with blanks so an opaque layer hides what is beneath
pub(crate) fn clear(buf: &mut Buffer, area: Rect) {
    let blank = " ".repeat(usize::from(area.width));
    for y in area.top()..area.bottom() {
        buf.set_string(area.x, y, &blank, Style::default());
    }
}
