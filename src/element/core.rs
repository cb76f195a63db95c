use serde_json::{Value, json};
use slotmap::SlotMap;

use crate::error::{Result, UiError};
use crate::geometry::{Point, Rectangle};
use crate::graphics::Graphics;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::style::ResourceId;

use super::ElementId;
use super::behavior::{Behavior, ElementContext, EventFlow};
use super::node::Element;

const LOG_TARGET: &str = "element_tree::tree";

/// How cursor events treat children of a node the point missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTestPolicy {
    /// Children are only probed when the point lies inside the parent.
    #[default]
    GateOnParent,
    /// Children are probed even when the parent was missed.
    ProbeChildren,
}

/// Arena owning every element. Parents list their children in insertion
/// order, which is also draw order and input dispatch order.
pub struct ElementTree {
    pub(crate) nodes: SlotMap<ElementId, Element>,
    hit_test: HitTestPolicy,
    logger: Option<Logger>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            hit_test: HitTestPolicy::default(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_hit_test(mut self, policy: HitTestPolicy) -> Self {
        self.hit_test = policy;
        self
    }

    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger = logger;
    }

    pub fn hit_test(&self) -> HitTestPolicy {
        self.hit_test
    }

    /// Insert a standalone node. It has no parent until attached.
    pub fn create(&mut self, element: Element) -> ElementId {
        let mut element = element;
        element.parent = None;
        element.children.clear();
        self.nodes.insert(element)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Result<&Element> {
        self.nodes.get(id).ok_or(UiError::ElementNotFound(id))
    }

    pub fn get_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.nodes.get_mut(id).ok_or(UiError::ElementNotFound(id))
    }

    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>> {
        Ok(self.get(id)?.parent)
    }

    pub fn children(&self, id: ElementId) -> Result<&[ElementId]> {
        Ok(&self.get(id)?.children)
    }

    pub fn content_rect(&self, id: ElementId) -> Result<Rectangle> {
        Ok(self.get(id)?.content_rect)
    }

    /// Topmost ancestor of `id`, or `id` itself for a root.
    pub fn root_of(&self, id: ElementId) -> Result<ElementId> {
        let mut current = id;
        while let Some(parent) = self.get(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Downcast the behavior of a node. `None` for a different type or while
    /// the behavior is running.
    pub fn behavior<T: Behavior>(&self, id: ElementId) -> Option<&T> {
        self.nodes
            .get(id)?
            .behavior
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior>(&mut self, id: ElementId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)?
            .behavior
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn set_behavior<B: Behavior>(&mut self, id: ElementId, behavior: B) -> Result<()> {
        self.get_mut(id)?.behavior = Some(Box::new(behavior));
        Ok(())
    }

    /// Append `child` to `parent`. The child must be a root that is not an
    /// ancestor of `parent`.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get(parent)?;
        if let Some(existing) = self.get(child)?.parent {
            return Err(UiError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::CyclicAttach { child, parent });
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.log_topology("attached", parent, child);
        Ok(())
    }

    /// Detach `child` from `parent` without destroying it.
    pub fn remove(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if self.get(child)?.parent != Some(parent) {
            return Err(UiError::NotAChild { child, parent });
        }

        self.nodes[parent].children.retain(|id| *id != child);
        self.nodes[child].parent = None;
        self.log_topology("removed", parent, child);
        Ok(())
    }

    /// Detach `id` and free it together with its whole subtree.
    ///
    /// Nodes whose behavior is currently running cannot be destroyed.
    pub fn destroy(&mut self, id: ElementId) -> Result<usize> {
        let subtree = self.subtree(id)?;
        if let Some(busy) = subtree
            .iter()
            .copied()
            .find(|node| self.nodes[*node].behavior.is_none())
        {
            return Err(UiError::ElementBusy {
                element: self.display_name(busy),
            });
        }

        if let Some(parent) = self.nodes[id].parent {
            self.remove(parent, id)?;
        }

        let name = self.display_name(id);
        for node in &subtree {
            self.nodes.remove(*node);
        }
        self.log(
            LogLevel::Trace,
            "destroyed",
            [
                json_kv("element", json!(name)),
                json_kv("count", json!(subtree.len())),
            ],
        );
        Ok(subtree.len())
    }

    /// `id` followed by every descendant, depth first in child order.
    pub fn subtree(&self, id: ElementId) -> Result<Vec<ElementId>> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// First descendant of `id` whose lookup name matches, depth first.
    /// `id` itself is never matched.
    pub fn child_by_id(&self, id: ElementId, name: &str) -> Option<ElementId> {
        let node = self.nodes.get(id)?;
        for child in &node.children {
            if self.nodes.get(*child)?.id.as_deref() == Some(name) {
                return Some(*child);
            }
            if let Some(found) = self.child_by_id(*child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Font for `id`: its own setting, else the nearest ancestor's.
    pub fn resolve_font(&self, id: ElementId) -> Option<ResourceId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(node_id)?;
            if let Some(font) = node.font_override() {
                return Some(font);
            }
            current = node.parent;
        }
        None
    }

    /// Run update hooks over the active part of the subtree.
    pub fn update(&mut self, id: ElementId) -> Result<()> {
        let node = self.get(id)?;
        if !node.active {
            return Ok(());
        }
        let content = node.content_rect;

        let flow = self
            .with_behavior(id, |behavior, ctx| Ok(behavior.on_update(ctx, content)))?
            .unwrap_or(EventFlow::Continue);
        if flow.is_consumed() {
            return Ok(());
        }

        for child in self.children_snapshot(id) {
            if self.nodes.contains_key(child) {
                self.update(child)?;
            }
        }
        Ok(())
    }

    /// Render the visible part of the subtree through `graphics`.
    pub fn draw(&mut self, id: ElementId, graphics: &mut dyn Graphics) -> Result<()> {
        let node = self.get(id)?;
        if node.drawing {
            return Err(UiError::ReentrantDraw {
                element: self.display_name(id),
            });
        }
        if !node.visible {
            return Ok(());
        }

        self.nodes[id].drawing = true;
        let result = self.draw_node(id, graphics);
        if let Some(node) = self.nodes.get_mut(id) {
            node.drawing = false;
        }
        result
    }

    fn draw_node(&mut self, id: ElementId, graphics: &mut dyn Graphics) -> Result<()> {
        let node = &self.nodes[id];
        let content = node.content_rect;
        let renders_default = node
            .behavior
            .as_ref()
            .map(|behavior| behavior.renders_default())
            .unwrap_or(true);

        if renders_default {
            let style = node.style;
            if style.paints_rectangle() {
                graphics.draw_rectangle(content, &style);
            }
            if !node.text.is_empty() {
                let font = self.resolve_font(id).ok_or_else(|| UiError::NoFont {
                    element: self.display_name(id),
                })?;
                if style.paints_foreground() {
                    graphics.font_print(
                        font,
                        content,
                        style.alignment,
                        style.foreground,
                        &self.nodes[id].text,
                    );
                }
            }
        }

        let flow = self
            .with_behavior(id, |behavior, ctx| behavior.on_draw(ctx, graphics, content))?
            .unwrap_or(EventFlow::Continue);
        if flow.is_consumed() {
            return Ok(());
        }

        for child in self.children_snapshot(id) {
            if self.nodes.contains_key(child) {
                self.draw(child, graphics)?;
            }
        }
        Ok(())
    }

    /// Deliver a cursor event. Returns `Consumed` once any node in the
    /// subtree consumed it; later siblings and their subtrees never see it.
    pub fn cursor_event(
        &mut self,
        id: ElementId,
        x: f32,
        y: f32,
        pressed: bool,
        moving: bool,
    ) -> Result<EventFlow> {
        let node = self.get(id)?;
        if !node.active {
            return Ok(EventFlow::Continue);
        }
        let content = node.content_rect;
        let hit = content.contains_point(x, y);

        if hit {
            let local = Point::new(x - content.left, y - content.top);
            let flow = self
                .with_behavior(id, |behavior, ctx| {
                    Ok(behavior.on_touched(ctx, local, pressed, moving))
                })?
                .unwrap_or(EventFlow::Continue);
            if flow.is_consumed() {
                return Ok(EventFlow::Consumed);
            }
        } else if self.hit_test == HitTestPolicy::GateOnParent {
            return Ok(EventFlow::Continue);
        }

        for child in self.children_snapshot(id) {
            if self.nodes.contains_key(child)
                && self.cursor_event(child, x, y, pressed, moving)?.is_consumed()
            {
                return Ok(EventFlow::Consumed);
            }
        }
        Ok(EventFlow::Continue)
    }

    /// Deliver a key to every active node until one consumes it.
    pub fn keyboard_event(&mut self, id: ElementId, ch: char, pressed: bool) -> Result<EventFlow> {
        if !self.get(id)?.active {
            return Ok(EventFlow::Continue);
        }

        let flow = self
            .with_behavior(id, |behavior, ctx| Ok(behavior.on_keyboard(ctx, ch, pressed)))?
            .unwrap_or(EventFlow::Continue);
        if flow.is_consumed() {
            return Ok(EventFlow::Consumed);
        }

        for child in self.children_snapshot(id) {
            if self.nodes.contains_key(child) && self.keyboard_event(child, ch, pressed)?.is_consumed()
            {
                return Ok(EventFlow::Consumed);
            }
        }
        Ok(EventFlow::Continue)
    }

    /// JSON dump of a subtree for diagnostics.
    pub fn describe(&self, id: ElementId) -> Result<Value> {
        let node = self.get(id)?;
        let children = node
            .children
            .iter()
            .map(|child| self.describe(*child))
            .collect::<Result<Vec<_>>>()?;
        Ok(json!({
            "id": node.id,
            "class": node.class_id(),
            "text": node.text,
            "pos": [node.pos.0, node.pos.1],
            "span": [node.span.0, node.span.1],
            "grid": [node.grid.0, node.grid.1],
            "visible": node.visible,
            "active": node.active,
            "rect": node.content_rect,
            "children": children,
        }))
    }

    /// Lookup name if set, else the arena handle.
    pub fn display_name(&self, id: ElementId) -> String {
        match self.nodes.get(id).and_then(|node| node.id.clone()) {
            Some(name) => name,
            None => format!("{id:?}"),
        }
    }

    /// Lift the behavior out of `id`, run `f`, put it back.
    ///
    /// Returns `None` when the behavior is already running higher up the
    /// stack, which happens when a hook re-enters a traversal on its own node.
    fn with_behavior<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut dyn Behavior, &mut ElementContext<'_>) -> Result<R>,
    ) -> Result<Option<R>> {
        let Some(mut behavior) = self.get_mut(id)?.behavior.take() else {
            return Ok(None);
        };

        let result = {
            let mut ctx = ElementContext::new(self, id);
            f(behavior.as_mut(), &mut ctx)
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
        result.map(Some)
    }

    fn children_snapshot(&self, id: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    fn log_topology(&self, message: &str, parent: ElementId, child: ElementId) {
        if self.logger.is_none() {
            return;
        }
        self.log(
            LogLevel::Trace,
            message,
            [
                json_kv("parent", json!(self.display_name(parent))),
                json_kv("child", json!(self.display_name(child))),
            ],
        );
    }

    pub(crate) fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
