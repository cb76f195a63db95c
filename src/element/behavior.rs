//! Per-node extension point.
//!
//! Every element carries exactly one [`Behavior`]. Traversals run the default
//! work for a node, then ask its behavior whether the event was consumed. A
//! consumed update, draw or input event is not passed on to the children.

use std::any::Any;

use crate::error::{Result, UiError};
use crate::geometry::{Point, Rectangle};
use crate::graphics::Graphics;
use crate::style::ResourceId;

use super::{Element, ElementId, ElementTree};

/// Control the propagation of a traversal below the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

impl EventFlow {
    pub fn is_consumed(self) -> bool {
        matches!(self, EventFlow::Consumed)
    }

    pub fn from_consumed(consumed: bool) -> Self {
        if consumed {
            EventFlow::Consumed
        } else {
            EventFlow::Continue
        }
    }
}

/// Customisation hooks for an element. All hooks default to `Continue`.
///
/// While a hook runs the behavior is lifted out of its node, so the
/// [`ElementContext`] can hand out the whole tree mutably.
pub trait Behavior: Any {
    fn class_id(&self) -> &'static str {
        "element"
    }

    /// When false the tree skips its own rectangle and text rendering and
    /// leaves everything to [`Behavior::on_draw`].
    fn renders_default(&self) -> bool {
        true
    }

    fn on_update(&mut self, _ctx: &mut ElementContext<'_>, _content: Rectangle) -> EventFlow {
        EventFlow::Continue
    }

    fn on_draw(
        &mut self,
        _ctx: &mut ElementContext<'_>,
        _graphics: &mut dyn Graphics,
        _content: Rectangle,
    ) -> Result<EventFlow> {
        Ok(EventFlow::Continue)
    }

    /// `local` is relative to the top left of the content rectangle.
    fn on_touched(
        &mut self,
        _ctx: &mut ElementContext<'_>,
        _local: Point,
        _pressed: bool,
        _moving: bool,
    ) -> EventFlow {
        EventFlow::Continue
    }

    fn on_keyboard(&mut self, _ctx: &mut ElementContext<'_>, _ch: char, _pressed: bool) -> EventFlow {
        EventFlow::Continue
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Behavior of an element with no customisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainElement;

impl Behavior for PlainElement {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Access handed to a running behavior.
pub struct ElementContext<'a> {
    tree: &'a mut ElementTree,
    id: ElementId,
}

impl<'a> ElementContext<'a> {
    pub(crate) fn new(tree: &'a mut ElementTree, id: ElementId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The node being dispatched to. A running node cannot be destroyed.
    pub fn element(&self) -> &Element {
        &self.tree.nodes[self.id]
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.tree.nodes[self.id]
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.element().parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.element().children
    }

    pub fn tree(&self) -> &ElementTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut *self.tree
    }

    /// Font for this node's text, or `NoFont` when the chain has none.
    pub fn resolve_font(&self) -> Result<ResourceId> {
        self.tree
            .resolve_font(self.id)
            .ok_or_else(|| UiError::NoFont {
                element: self.tree.display_name(self.id),
            })
    }
}

type UpdateHook = Box<dyn FnMut(&mut ElementContext<'_>, Rectangle) -> EventFlow>;
type DrawHook =
    Box<dyn FnMut(&mut ElementContext<'_>, &mut dyn Graphics, Rectangle) -> Result<EventFlow>>;
type TouchHook = Box<dyn FnMut(&mut ElementContext<'_>, Point, bool, bool) -> EventFlow>;
type KeyboardHook = Box<dyn FnMut(&mut ElementContext<'_>, char, bool) -> EventFlow>;

/// Closure based behavior for one-off customisation without a new type.
///
/// ```
/// use element_tree::{Callbacks, Element, EventFlow};
///
/// let button = Element::new().with_behavior(
///     Callbacks::new().on_touched(|_ctx, _local, pressed, _moving| EventFlow::from_consumed(pressed)),
/// );
/// # let _ = button;
/// ```
#[derive(Default)]
pub struct Callbacks {
    update: Option<UpdateHook>,
    draw: Option<DrawHook>,
    touched: Option<TouchHook>,
    keyboard: Option<KeyboardHook>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>, Rectangle) -> EventFlow + 'static,
    {
        self.update = Some(Box::new(hook));
        self
    }

    pub fn on_draw<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>, &mut dyn Graphics, Rectangle) -> Result<EventFlow>
            + 'static,
    {
        self.draw = Some(Box::new(hook));
        self
    }

    pub fn on_touched<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>, Point, bool, bool) -> EventFlow + 'static,
    {
        self.touched = Some(Box::new(hook));
        self
    }

    pub fn on_keyboard<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>, char, bool) -> EventFlow + 'static,
    {
        self.keyboard = Some(Box::new(hook));
        self
    }
}

impl Behavior for Callbacks {
    fn class_id(&self) -> &'static str {
        "callbacks"
    }

    fn on_update(&mut self, ctx: &mut ElementContext<'_>, content: Rectangle) -> EventFlow {
        match self.update.as_mut() {
            Some(hook) => hook(ctx, content),
            None => EventFlow::Continue,
        }
    }

    fn on_draw(
        &mut self,
        ctx: &mut ElementContext<'_>,
        graphics: &mut dyn Graphics,
        content: Rectangle,
    ) -> Result<EventFlow> {
        match self.draw.as_mut() {
            Some(hook) => hook(ctx, graphics, content),
            None => Ok(EventFlow::Continue),
        }
    }

    fn on_touched(
        &mut self,
        ctx: &mut ElementContext<'_>,
        local: Point,
        pressed: bool,
        moving: bool,
    ) -> EventFlow {
        match self.touched.as_mut() {
            Some(hook) => hook(ctx, local, pressed, moving),
            None => EventFlow::Continue,
        }
    }

    fn on_keyboard(&mut self, ctx: &mut ElementContext<'_>, ch: char, pressed: bool) -> EventFlow {
        match self.keyboard.as_mut() {
            Some(hook) => hook(ctx, ch, pressed),
            None => EventFlow::Continue,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
