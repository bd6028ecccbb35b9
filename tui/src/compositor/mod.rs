//! Layered Compositor
//!
//! Manages z-ordered layers for rendering. Each layer has its own buffer
//! and can be positioned, resized, and shown or hidden independently.
//!
//! The compositor composites all visible layers into a final output buffer.
//! Transparent layers let blank cells show what is beneath; opaque layers
//! (the detail overlay) cover their whole bounds.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let layer = Layer::new(id, bounds, z_index);
        self.layers.insert(id, layer);
        self.update_render_order();

        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Screen bounds of a layer
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Move and resize a layer in one step
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            if layer.bounds.width != bounds.width || layer.bounds.height != bounds.height {
                // Buffer uses origin coordinates
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
            layer.bounds = bounds;
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is currently shown
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(|l| l.visible)
    }

    /// Mark a layer as covering everything beneath it
    pub fn set_opaque(&mut self, id: LayerId, opaque: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.opaque = opaque;
        }
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Total composited area
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, &self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer
    fn blit_layer(output: &mut Buffer, area: &Rect, layer: &Layer) {
        let lb = &layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x + lx;
                let dst_y = lb.y + ly;

                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let src_idx = layer.buffer.index_of(lx, ly);
                let Some(src_cell) = layer.buffer.content.get(src_idx) else {
                    continue;
                };

                // Blank cells of transparent layers are holes
                if layer.opaque || src_cell.symbol() != " " {
                    let dst_idx = output.index_of(dst_x, dst_y);
                    if let Some(dst) = output.content.get_mut(dst_idx) {
                        *dst = src_cell.clone();
                    }
                }
            }
        }
    }

    /// Find the topmost layer at a given position (for mouse events)
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        // Front to back
        for &id in self.render_order.iter().rev() {
            if let Some(layer) = self.layers.get(&id) {
                if layer.visible && layer.contains(x, y) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| self.layers.get(id).map_or((0, id.0), |l| (l.z_index, id.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    #[test]
    fn test_front_layer_wins() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 3));
        let back = compositor.create_layer(Rect::new(0, 0, 10, 3), 0);
        let front = compositor.create_layer(Rect::new(2, 1, 3, 1), 50);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 1, "aaaaaaaaaa", Style::default());
        compositor
            .layer_buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "b", Style::default());

        let out = compositor.composite();
        assert_eq!(symbol_at(out, 2, 1), "b");
        // Transparent hole shows the back layer
        assert_eq!(symbol_at(out, 3, 1), "a");
    }

    #[test]
    fn test_opaque_layer_hides_background() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 3));
        let back = compositor.create_layer(Rect::new(0, 0, 10, 3), 0);
        let front = compositor.create_layer(Rect::new(2, 1, 3, 1), 50);
        compositor.set_opaque(front, true);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 1, "aaaaaaaaaa", Style::default());

        let out = compositor.composite();
        assert_eq!(symbol_at(out, 3, 1), " ");
        assert_eq!(symbol_at(out, 5, 1), "a");
    }

    #[test]
    fn test_layer_at_skips_hidden_layers() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 20, 10));
        let grid = compositor.create_layer(Rect::new(0, 0, 20, 10), 0);
        let modal = compositor.create_layer(Rect::new(5, 2, 10, 5), 50);

        assert_eq!(compositor.layer_at(6, 3), Some(modal));
        compositor.set_visible(modal, false);
        assert_eq!(compositor.layer_at(6, 3), Some(grid));
        assert!(!compositor.is_visible(modal));
        assert_eq!(compositor.layer_at(30, 30), None);
    }

    #[test]
    fn test_set_bounds_resizes_buffer() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 20, 10));
        let id = compositor.create_layer(Rect::new(0, 0, 4, 4), 0);
        compositor.set_bounds(id, Rect::new(1, 1, 8, 2));

        assert_eq!(compositor.layer_bounds(id), Some(Rect::new(1, 1, 8, 2)));
        assert_eq!(
            compositor.layer_buffer_mut(id).unwrap().area,
            Rect::new(0, 0, 8, 2)
        );
    }
}
