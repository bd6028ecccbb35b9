//! Grid Layout
//!
//! Fixed-size card cells flowing left to right, top to bottom. The column
//! count follows the terminal width; rows scroll vertically so the focused
//! card stays in view.

use ratatui::layout::Rect;

/// Card cell width, border included
pub const CARD_WIDTH: u16 = 32;
/// Card cell height, border included
pub const CARD_HEIGHT: u16 = 7;
/// Blank columns between cards
pub const GAP: u16 = 1;

/// Where each card sits inside the grid layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Area available to the grid
    pub area: Rect,
    /// Cards per row (at least one)
    pub columns: usize,
    /// First visible row
    pub scroll_row: usize,
}

impl GridLayout {
    /// Lay out a grid for the given area
    pub fn new(area: Rect) -> Self {
        let columns = usize::from((area.width + GAP) / (CARD_WIDTH + GAP)).max(1);
        Self {
            area,
            columns,
            scroll_row: 0,
        }
    }

    /// Rows that fit on screen (at least one)
    pub fn visible_rows(&self) -> usize {
        usize::from(self.area.height / CARD_HEIGHT).max(1)
    }

    /// Row holding the card at `index`
    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Scroll just enough to bring the card at `index` into view
    pub fn scroll_to(&mut self, index: usize) {
        let row = self.row_of(index);
        let visible = self.visible_rows();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }
    }

    /// Scroll by whole rows, clamped to the content
    pub fn scroll_by(&mut self, delta: isize, total: usize) {
        let rows = total.div_ceil(self.columns);
        let max = rows.saturating_sub(self.visible_rows());
        self.scroll_row = self.scroll_row.saturating_add_signed(delta).min(max);
    }

    /// Screen rect of the card at `index`, if it is on screen
    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        let row = self.row_of(index);
        if row < self.scroll_row || row >= self.scroll_row + self.visible_rows() {
            return None;
        }
        let column = u16::try_from(index % self.columns).ok()?;
        let visible_row = u16::try_from(row - self.scroll_row).ok()?;

        let x = self.area.x + column * (CARD_WIDTH + GAP);
        let y = self.area.y + visible_row * CARD_HEIGHT;
        let width = CARD_WIDTH.min(self.area.right().saturating_sub(x));
        let height = CARD_HEIGHT.min(self.area.bottom().saturating_sub(y));
        (width > 0 && height > 0).then(|| Rect::new(x, y, width, height))
    }

    /// Card index under a screen position
    pub fn index_at(&self, x: u16, y: u16, total: usize) -> Option<usize> {
        if x < self.area.x || y < self.area.y {
            return None;
        }
        let column = usize::from((x - self.area.x) / (CARD_WIDTH + GAP));
        if column >= self.columns || (x - self.area.x) % (CARD_WIDTH + GAP) >= CARD_WIDTH {
            return None;
        }
        let row = self.scroll_row + usize::from((y - self.area.y) / CARD_HEIGHT);
        let index = row * self.columns + column;
        (index < total && self.card_rect(index).is_some()).then_some(index)
    }

    /// Focus target for an arrow move from `index`
    pub fn step(&self, index: usize, direction: Direction, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let last = total - 1;
        match direction {
            Direction::Left => index.saturating_sub(1),
            Direction::Right => (index + 1).min(last),
            Direction::Up => index.checked_sub(self.columns).unwrap_or(index),
            Direction::Down => {
                let next = index + self.columns;
                if next <= last {
                    next
                } else {
                    index
                }
            }
        }
    }
}

/// Focus movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Previous card
    Left,
    /// Next card
    Right,
    /// Card above
    Up,
    /// Card below
    Down,
}
