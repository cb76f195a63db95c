use serde_json::json;

use crate::element::{ElementId, ElementTree};
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::logging::{LogLevel, json_kv};

/// Fraction of a parent covered by `span` cells starting at `pos` in a
/// `grid` of columns and rows. Zero sizes are treated as one.
pub fn cell_fraction(pos: (u32, u32), span: (u32, u32), grid: (u32, u32)) -> Rectangle {
    let width = grid.0.max(1) as f32;
    let height = grid.1.max(1) as f32;
    let span_x = span.0.max(1);
    let span_y = span.1.max(1);
    Rectangle::new(
        pos.0 as f32 / width,
        pos.1 as f32 / height,
        pos.0.saturating_add(span_x) as f32 / width,
        pos.1.saturating_add(span_y) as f32 / height,
    )
}

/// Pull a cell placement back inside `grid` so it never leaves the parent.
fn clamp_to_grid(pos: (u32, u32), span: (u32, u32), grid: (u32, u32)) -> ((u32, u32), (u32, u32)) {
    let (columns, rows) = (grid.0.max(1), grid.1.max(1));
    let pos = (pos.0.min(columns - 1), pos.1.min(rows - 1));
    let span = (span.0.clamp(1, columns - pos.0), span.1.clamp(1, rows - pos.1));
    (pos, span)
}

/// Resolve a node's content rectangle: place the grid cell inside the parent
/// rectangle, then shrink the cell by the node's fractional padding.
pub fn resolve_content_rect(
    parent_rect: &Rectangle,
    parent_grid: (u32, u32),
    pos: (u32, u32),
    span: (u32, u32),
    padding: &Rectangle,
) -> Rectangle {
    let cell = parent_rect.sub_rect(&cell_fraction(pos, span, parent_grid));
    cell.sub_rect(padding)
}

impl ElementTree {
    /// Recompute content rectangles for `id` and its subtree.
    ///
    /// `parent_rect` is the rectangle the node is placed into: the display
    /// rectangle for a root, the parent's content rectangle otherwise. A root
    /// sits in a single cell grid. Auto-grids size themselves from their
    /// current child count, one level at a time on the way down.
    pub fn layout(&mut self, id: ElementId, parent_rect: Rectangle) -> Result<()> {
        let parent_grid = match self.get(id)?.parent {
            Some(parent) => self.get(parent)?.grid,
            None => (1, 1),
        };
        self.layout_node(id, parent_rect, parent_grid);
        Ok(())
    }

    fn layout_node(&mut self, id: ElementId, parent_rect: Rectangle, parent_grid: (u32, u32)) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };

        if let Some(orientation) = node.auto_grid {
            if !node.children.is_empty() {
                node.grid = orientation.grid_for(node.children.len());
            }
        }
        node.grid = (node.grid.0.max(1), node.grid.1.max(1));
        node.span = (node.span.0.max(1), node.span.1.max(1));

        let (pos, span) = clamp_to_grid(node.pos, node.span, parent_grid);
        node.content_rect = resolve_content_rect(&parent_rect, parent_grid, pos, span, &node.padding);
        let clamped = (pos, span) != (node.pos, node.span);

        let rect = node.content_rect;
        let grid = node.grid;
        let children = node.children.clone();
        if clamped {
            self.log(
                LogLevel::Warn,
                "cell_clamped",
                [
                    json_kv("element", json!(self.display_name(id))),
                    json_kv("grid", json!([parent_grid.0, parent_grid.1])),
                    json_kv("pos", json!([pos.0, pos.1])),
                    json_kv("span", json!([span.0, span.1])),
                ],
            );
        }
        for child in children {
            self.layout_node(child, rect, grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Orientation};
    use crate::logging::{Logger, MemorySink};

    fn display() -> Rectangle {
        Rectangle::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn cell_fraction_covers_span() {
        let cell = cell_fraction((1, 0), (2, 1), (4, 2));
        assert_eq!(cell, Rectangle::new(0.25, 0.0, 0.75, 0.5));
    }

    #[test]
    fn two_by_two_grid_yields_quadrants() {
        let mut tree = ElementTree::new();
        let root = tree.create(Element::new().with_grid(2, 2));
        let mut quads = Vec::new();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let child = tree.create(Element::new().with_pos(x, y));
            tree.attach(root, child).unwrap();
            quads.push(child);
        }
        tree.layout(root, display()).unwrap();

        let expected = [
            Rectangle::new(0.0, 0.0, 400.0, 300.0),
            Rectangle::new(400.0, 0.0, 800.0, 300.0),
            Rectangle::new(0.0, 300.0, 400.0, 600.0),
            Rectangle::new(400.0, 300.0, 800.0, 600.0),
        ];
        for (child, rect) in quads.iter().zip(expected) {
            assert!(tree.content_rect(*child).unwrap().approx_eq(&rect));
        }

        // Identical padding on every child shrinks each quadrant the same way.
        for child in &quads {
            tree.get_mut(*child).unwrap().set_padding(0.1);
        }
        tree.layout(root, display()).unwrap();
        for (child, rect) in quads.iter().zip(expected) {
            let padded = rect.sub_rect(&Rectangle::new(0.1, 0.1, 0.9, 0.9));
            assert!(tree.content_rect(*child).unwrap().approx_eq(&padded));
        }
    }

    #[test]
    fn padding_forms_are_equivalent() {
        let mut tree = ElementTree::new();
        let a = tree.create(Element::new().with_padding(0.2));
        let b = tree.create(Element::new().with_padding_edges(0.2, 0.8, 0.2, 0.8));
        let parent = Rectangle::new(10.0, 20.0, 210.0, 120.0);
        tree.layout(a, parent).unwrap();
        tree.layout(b, parent).unwrap();

        let ra = tree.content_rect(a).unwrap();
        assert!(ra.approx_eq(&tree.content_rect(b).unwrap()));
        assert!(ra.approx_eq(&Rectangle::new(50.0, 40.0, 170.0, 100.0)));
    }

    #[test]
    fn children_stay_inside_parent() {
        let mut tree = ElementTree::new();
        let root = tree.create(Element::new().with_grid(3, 3).with_padding(0.05));
        let wide = tree.create(Element::new().with_pos(0, 1).with_span(3, 2).with_grid(2, 1));
        let nested = tree.create(Element::new().with_pos(1, 0).with_padding(0.1));
        tree.attach(root, wide).unwrap();
        tree.attach(wide, nested).unwrap();
        tree.layout(root, display()).unwrap();

        for id in tree.subtree(root).unwrap() {
            if let Some(parent) = tree.parent(id).unwrap() {
                let outer = tree.content_rect(parent).unwrap();
                assert!(outer.contains_rect(&tree.content_rect(id).unwrap()));
            }
        }
    }

    #[test]
    fn out_of_grid_cells_are_clamped_and_logged() {
        let sink = MemorySink::new();
        let mut tree = ElementTree::new().with_logger(Logger::new(sink.clone()));
        let root = tree.create(Element::new().with_grid(2, 1));
        let stray = tree.create(Element::new().with_id("stray").with_pos(3, 0).with_span(2, 4));
        tree.attach(root, stray).unwrap();
        tree.layout(root, display()).unwrap();

        let rect = tree.content_rect(stray).unwrap();
        assert!(rect.approx_eq(&Rectangle::new(400.0, 0.0, 800.0, 600.0)));
        assert!(tree.content_rect(root).unwrap().contains_rect(&rect));
        assert_eq!(tree.get(stray).unwrap().pos, (3, 0));

        let event = sink
            .events()
            .into_iter()
            .find(|event| event.message == "cell_clamped")
            .unwrap();
        assert_eq!(event.field("element"), Some(&json!("stray")));
        assert_eq!(event.field("pos"), Some(&json!([1, 0])));
    }

    #[test]
    fn auto_grid_tracks_child_count() {
        let mut tree = ElementTree::new();
        let row = tree.create(Element::new().with_auto_grid(Orientation::Horizontal));
        tree.layout(row, display()).unwrap();
        assert_eq!(tree.get(row).unwrap().grid, (1, 1));

        let mut children = Vec::new();
        for x in 0..4 {
            let child = tree.create(Element::new().with_pos(x, 0));
            tree.attach(row, child).unwrap();
            children.push(child);
        }
        tree.layout(row, display()).unwrap();
        assert_eq!(tree.get(row).unwrap().grid, (4, 1));
        assert!(tree
            .content_rect(children[3])
            .unwrap()
            .approx_eq(&Rectangle::new(600.0, 0.0, 800.0, 600.0)));

        tree.destroy(children[3]).unwrap();
        tree.layout(row, display()).unwrap();
        assert_eq!(tree.get(row).unwrap().grid, (3, 1));
    }

    #[test]
    fn subtree_layout_uses_parent_grid() {
        let mut tree = ElementTree::new();
        let root = tree.create(Element::new().with_grid(2, 1));
        let right = tree.create(Element::new().with_pos(1, 0));
        tree.attach(root, right).unwrap();
        tree.layout(right, Rectangle::new(0.0, 0.0, 100.0, 50.0)).unwrap();
        assert!(tree
            .content_rect(right)
            .unwrap()
            .approx_eq(&Rectangle::new(50.0, 0.0, 100.0, 50.0)));
    }
}
