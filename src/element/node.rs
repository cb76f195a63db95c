use crate::geometry::Rectangle;
use crate::style::{ResourceId, Style};

use super::ElementId;
use super::behavior::{Behavior, PlainElement};

/// Axis along which an auto-grid lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Grid dimensions for `count` children laid out along this axis.
    pub fn grid_for(self, count: usize) -> (u32, u32) {
        let count = u32::try_from(count).unwrap_or(u32::MAX).max(1);
        match self {
            Orientation::Horizontal => (count, 1),
            Orientation::Vertical => (1, count),
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "horizontal" | "row" => Some(Self::Horizontal),
            "vertical" | "column" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// A node of the element tree.
///
/// Placement is expressed in cells of the parent's grid: the node covers
/// `span` cells starting at `pos`, inside a parent divided into `grid`
/// columns and rows. `padding` then shrinks that cell, as fractions.
pub struct Element {
    /// Lookup name used by [`super::ElementTree::child_by_id`].
    pub id: Option<String>,
    pub text: String,
    pub pos: (u32, u32),
    pub span: (u32, u32),
    /// Grid this node offers to its own children.
    pub grid: (u32, u32),
    pub auto_grid: Option<Orientation>,
    pub padding: Rectangle,
    pub style: Style,
    /// Takes precedence over `style.font` when resolving fonts.
    pub font: Option<ResourceId>,
    /// Gates drawing only.
    pub visible: bool,
    /// Gates update and input.
    pub active: bool,
    pub user_value: u64,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) content_rect: Rectangle,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) drawing: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: None,
            text: String::new(),
            pos: (0, 0),
            span: (1, 1),
            grid: (1, 1),
            auto_grid: None,
            padding: Rectangle::unit(),
            style: Style::default(),
            font: None,
            visible: true,
            active: true,
            user_value: 0,
            parent: None,
            children: Vec::new(),
            content_rect: Rectangle::default(),
            behavior: Some(Box::new(PlainElement)),
            drawing: false,
        }
    }
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_pos(mut self, x: u32, y: u32) -> Self {
        self.pos = (x, y);
        self
    }

    pub fn with_span(mut self, x: u32, y: u32) -> Self {
        self.span = (x, y);
        self
    }

    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.grid = (width, height);
        self
    }

    pub fn with_auto_grid(mut self, orientation: Orientation) -> Self {
        self.auto_grid = Some(orientation);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.set_padding(padding);
        self
    }

    pub fn with_padding_edges(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.set_padding_edges(left, right, top, bottom);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, font: ResourceId) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_user_value(mut self, value: u64) -> Self {
        self.user_value = value;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_behavior<B>(mut self, behavior: B) -> Self
    where
        B: Behavior,
    {
        self.set_behavior(behavior);
        self
    }

    pub fn set_behavior<B>(&mut self, behavior: B)
    where
        B: Behavior,
    {
        self.behavior = Some(Box::new(behavior));
    }

    /// Same inset on every side: `p` from the near edges, `1 - p` for the far ones.
    pub fn set_padding(&mut self, padding: f32) {
        self.set_padding_edges(padding, 1.0 - padding, padding, 1.0 - padding);
    }

    /// Raw fractional edge positions inside the cell.
    pub fn set_padding_edges(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.padding = Rectangle::new(left, top, right, bottom);
    }

    pub fn set_grid(&mut self, width: u32, height: u32) {
        self.grid = (width, height);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Resolved area from the last layout pass.
    pub fn content_rect(&self) -> Rectangle {
        self.content_rect
    }

    /// Class of the attached behavior, `None` while it is running.
    pub fn class_id(&self) -> Option<&'static str> {
        self.behavior.as_ref().map(|behavior| behavior.class_id())
    }

    pub fn font_override(&self) -> Option<ResourceId> {
        self.font.or(self.style.font)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("pos", &self.pos)
            .field("span", &self.span)
            .field("grid", &self.grid)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("content_rect", &self.content_rect)
            .field("class_id", &self.class_id())
            .finish_non_exhaustive()
    }
}
