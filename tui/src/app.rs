//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - Background fetches from the configured podcast source
//! - A [`CatalogView`] holding the grid and the modal
//! - A compositor with grid, status and modal layers
//!
//! All catalog state lives in the core. The app turns terminal events into
//! focus moves, card activations and close gestures, then draws the views
//! the core exposes.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use ratatui::Terminal;
use tokio::sync::mpsc;

use catalog_core::{
    CatalogConfig, CatalogView, DateFormatter, LoadOutcome, PodcastRecord, PodcastSource,
    SourceError,
};

use crate::compositor::{Compositor, LayerId};
use crate::layout::{Direction, GridLayout};
use crate::theme;
use crate::widgets::{modal_area, truncate, CardWidget, ModalWidget};

/// Frame tick when idle
const TICK: Duration = Duration::from_millis(250);

/// Status bar height (lines)
const STATUS_HEIGHT: u16 = 1;

type FetchResult = Result<Vec<PodcastRecord>, SourceError>;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Grid, modal and load error
    catalog: CatalogView,

    // === Data Source ===
    /// Where podcasts come from
    source: Arc<dyn PodcastSource>,
    /// Fetch results from background tasks
    fetch_tx: mpsc::Sender<FetchResult>,
    fetch_rx: mpsc::Receiver<FetchResult>,
    /// A fetch is in flight
    loading: bool,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Card placement inside the grid layer
    layout: GridLayout,

    // === Input State ===
    /// Focused card index
    focus: usize,
    /// Grid layer needs a redraw
    grid_dirty: bool,
    /// First visible content line of the overlay
    modal_scroll: usize,
}

/// Layer IDs for UI regions
struct AppLayers {
    grid: LayerId,
    status: LayerId,
    modal: LayerId,
}

impl App {
    /// Create an app for the configured source and a screen of `size`
    ///
    /// # Errors
    ///
    /// Fails if the configured source cannot be built.
    pub fn new(config: &CatalogConfig, size: (u16, u16)) -> anyhow::Result<Self> {
        let source: Arc<dyn PodcastSource> = Arc::from(config.build_source()?);
        tracing::info!(source = source.name(), date_style = %config.date_style, "Catalog source ready");
        Ok(Self::with_source(source, config.formatter(), size))
    }

    /// Create an app around an explicit source
    pub fn with_source(
        source: Arc<dyn PodcastSource>,
        formatter: DateFormatter,
        size: (u16, u16),
    ) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);

        let grid = compositor.create_layer(grid_bounds(area), 0);
        let status = compositor.create_layer(status_bounds(area), 10);
        let modal = compositor.create_layer(modal_area(area), 50);
        compositor.set_opaque(modal, true);
        compositor.set_visible(modal, false);

        let (fetch_tx, fetch_rx) = mpsc::channel(4);

        Self {
            running: true,
            catalog: CatalogView::new(formatter),
            source,
            fetch_tx,
            fetch_rx,
            loading: false,
            compositor,
            layers: AppLayers {
                grid,
                status,
                modal,
            },
            layout: GridLayout::new(local(grid_bounds(area))),
            focus: 0,
            grid_dirty: true,
            modal_scroll: 0,
        }
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Fails if drawing to the terminal fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.request_fetch();
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                        None => self.running = false,
                    }
                }

                Some(result) = self.fetch_rx.recv() => {
                    self.apply_fetch(result);
                }

                _ = tokio::time::sleep(TICK) => {}
            }

            self.render(terminal)?;
        }

        Ok(())
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Start a background fetch unless one is already running
    pub fn request_fetch(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.grid_dirty = true;

        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        tracing::info!(source = source.name(), "Fetching podcasts");
        tokio::spawn(async move {
            let result = source.fetch().await;
            if tx.send(result).await.is_err() {
                tracing::debug!("App gone before fetch completed");
            }
        });
    }

    /// Wait for the in-flight fetch and apply it
    pub async fn next_fetch(&mut self) -> Option<LoadOutcome> {
        let result = self.fetch_rx.recv().await?;
        Some(self.apply_fetch(result))
    }

    /// Apply a fetch result to the catalog
    pub fn apply_fetch(&mut self, result: FetchResult) -> LoadOutcome {
        self.loading = false;
        self.grid_dirty = true;
        let outcome = self.catalog.apply(result);
        if let LoadOutcome::Rendered(count) = outcome {
            self.focus = self.focus.min(count.saturating_sub(1));
            self.layout.scroll_row = 0;
            self.layout.scroll_to(self.focus);
        }
        outcome
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let modal_open = self.catalog.modal_visible();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Close the overlay first, quit otherwise
            KeyCode::Esc | KeyCode::Char('q') => {
                if modal_open {
                    self.catalog.close_modal();
                } else {
                    self.running = false;
                }
            }

            KeyCode::Up | KeyCode::Char('k') if modal_open => self.scroll_modal(-1),
            KeyCode::Down | KeyCode::Char('j') if modal_open => self.scroll_modal(1),

            // The overlay swallows everything else
            _ if modal_open => {}

            KeyCode::Left | KeyCode::Char('h') => self.move_focus(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_focus(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(Direction::Down),

            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate(self.focus);
            }

            KeyCode::Char('r') => self.request_fetch(),

            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.compositor.layer_at(mouse.column, mouse.row);

                if self.catalog.modal_visible() {
                    // A click outside the overlay closes it
                    if hit != Some(self.layers.modal) {
                        self.catalog.close_modal();
                    }
                    return;
                }

                if hit != Some(self.layers.grid) {
                    return;
                }
                let Some(bounds) = self.compositor.layer_bounds(self.layers.grid) else {
                    return;
                };
                let index = self.layout.index_at(
                    mouse.column - bounds.x,
                    mouse.row - bounds.y,
                    self.catalog.grid().len(),
                );
                if let Some(index) = index {
                    self.set_focus(index);
                    self.activate(index);
                }
            }
            MouseEventKind::ScrollUp if self.catalog.modal_visible() => self.scroll_modal(-1),
            MouseEventKind::ScrollDown if self.catalog.modal_visible() => self.scroll_modal(1),
            MouseEventKind::ScrollUp => {
                self.layout.scroll_by(-1, self.catalog.grid().len());
                self.grid_dirty = true;
            }
            MouseEventKind::ScrollDown => {
                self.layout.scroll_by(1, self.catalog.grid().len());
                self.grid_dirty = true;
            }
            _ => {}
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        self.compositor.resize(area);
        self.compositor.set_bounds(self.layers.grid, grid_bounds(area));
        self.compositor.set_bounds(self.layers.status, status_bounds(area));
        self.compositor.set_bounds(self.layers.modal, modal_area(area));

        self.layout = GridLayout::new(local(grid_bounds(area)));
        self.layout.scroll_to(self.focus);
        self.grid_dirty = true;
    }

    fn move_focus(&mut self, direction: Direction) {
        let next = self
            .layout
            .step(self.focus, direction, self.catalog.grid().len());
        self.set_focus(next);
    }

    fn set_focus(&mut self, index: usize) {
        if index != self.focus {
            self.focus = index;
            self.layout.scroll_to(index);
            self.grid_dirty = true;
        }
    }

    fn activate(&mut self, index: usize) {
        if self.catalog.grid().activate(index) {
            self.modal_scroll = 0;
        } else {
            tracing::debug!(index, "No card to activate");
        }
    }

    fn scroll_modal(&mut self, delta: isize) {
        let Some(area) = self.compositor.layer_bounds(self.layers.modal) else {
            return;
        };
        let modal = self.catalog.modal();
        let max = ModalWidget::new(modal.borrow().view()).max_scroll(area);
        self.modal_scroll = self.modal_scroll.saturating_add_signed(delta).min(max);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Sync layer state with the catalog
    fn update(&mut self) {
        self.compositor
            .set_visible(self.layers.modal, self.catalog.modal_visible());

        if self.catalog.grid().take_dirty() {
            self.grid_dirty = true;
        }
    }

    /// Draw every layer and return the composited frame
    pub fn draw(&mut self) -> &Buffer {
        self.update();
        self.render_grid();
        self.render_status();
        self.render_modal();
        self.compositor.composite()
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            let output = self.draw();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })?;

        Ok(())
    }

    /// Render grid layer
    fn render_grid(&mut self) {
        if !self.grid_dirty {
            return;
        }
        self.grid_dirty = false;

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.grid) else {
            return;
        };
        buf.reset();

        let grid = self.catalog.grid();
        if grid.is_empty() {
            let message = if self.loading {
                "Loading podcasts…".to_string()
            } else if let Some(error) = self.catalog.error() {
                error.to_string()
            } else {
                "No podcasts to show".to_string()
            };
            let area = buf.area;
            buf.set_string(
                area.x + 2,
                area.y + 1,
                truncate(&message, usize::from(area.width.saturating_sub(4))),
                Style::default().fg(theme::DIM_GRAY),
            );
            return;
        }

        for (index, card) in grid.cards().enumerate() {
            if let Some(rect) = self.layout.card_rect(index) {
                let card = card.borrow();
                CardWidget::new(card.view())
                    .focused(index == self.focus)
                    .render(rect, buf);
            }
        }
    }

    /// Render status bar
    fn render_status(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        let width = usize::from(area.width);

        let (status, style) = if self.loading {
            (
                " Loading podcasts…".to_string(),
                Style::default().fg(theme::ACCENT),
            )
        } else if let Some(error) = self.catalog.error() {
            (
                format!(" {error} | r retry | q quit"),
                Style::default()
                    .fg(theme::ERROR_RED)
                    .add_modifier(Modifier::BOLD),
            )
        } else if self.catalog.modal_visible() {
            (
                " ↑↓ scroll | Esc or click outside to close".to_string(),
                Style::default().fg(theme::DIM_GRAY),
            )
        } else {
            (
                format!(
                    " {} podcasts | ←↑↓→ move | Enter open | r reload | q quit",
                    self.catalog.loaded()
                ),
                Style::default().fg(theme::DIM_GRAY),
            )
        };

        buf.set_string(area.x, area.y, truncate(&status, width), style);
    }

    /// Render modal layer
    fn render_modal(&mut self) {
        if !self.catalog.modal_visible() {
            return;
        }
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.modal) else {
            return;
        };
        buf.reset();

        let modal = self.catalog.modal();
        let modal = modal.borrow();
        let area = buf.area;
        ModalWidget::new(modal.view())
            .scroll(self.modal_scroll)
            .render(area, buf);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Focused card index
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Catalog state
    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    /// First visible content line of the overlay
    pub fn modal_scroll(&self) -> usize {
        self.modal_scroll
    }

    /// Current grid placement
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
}

/// Grid layer: everything above the status bar
fn grid_bounds(area: Rect) -> Rect {
    Rect::new(
        0,
        0,
        area.width,
        area.height.saturating_sub(STATUS_HEIGHT),
    )
}

/// Status layer: the bottom line
fn status_bounds(area: Rect) -> Rect {
    Rect::new(
        0,
        area.height.saturating_sub(STATUS_HEIGHT),
        area.width,
        STATUS_HEIGHT,
    )
}

/// Layer buffers use origin coordinates
fn local(bounds: Rect) -> Rect {
    Rect::new(0, 0, bounds.width, bounds.height)
}
