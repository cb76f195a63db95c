use std::any::Any;

use serde_json::json;

use crate::element::{Behavior, Element, ElementContext, ElementId, ElementTree, EventFlow, Orientation};
use crate::error::Result;
use crate::geometry::{Point, Rectangle};
use crate::graphics::Graphics;
use crate::logging::{LogLevel, json_kv};
use crate::style::ResourceId;

use super::{TickStyle, control_style, draw_toggle};

/// One option of a [`RadioButtonGroup`]. The option's value is the
/// element's `user_value`.
#[derive(Debug, Default)]
pub struct RadioButton {
    checked: bool,
    tick: TickStyle,
}

impl RadioButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(label: impl Into<String>, value: u64, font: Option<ResourceId>) -> Element {
        let mut element = Element::new()
            .with_text(label)
            .with_user_value(value)
            .with_style(control_style())
            .with_behavior(Self::new());
        element.font = font;
        element
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Behavior for RadioButton {
    fn class_id(&self) -> &'static str {
        "radio-button"
    }

    fn renders_default(&self) -> bool {
        false
    }

    fn on_draw(
        &mut self,
        ctx: &mut ElementContext<'_>,
        graphics: &mut dyn Graphics,
        content: Rectangle,
    ) -> Result<EventFlow> {
        draw_toggle(ctx, graphics, content, self.checked, self.tick)
    }

    fn on_touched(
        &mut self,
        ctx: &mut ElementContext<'_>,
        _local: Point,
        pressed: bool,
        moving: bool,
    ) -> EventFlow {
        if !pressed || moving {
            return EventFlow::Continue;
        }
        let Some(group) = ctx.parent() else {
            return EventFlow::Continue;
        };
        if ctx.tree().behavior::<RadioButtonGroup>(group).is_none() {
            return EventFlow::Continue;
        }

        // This button is lifted out of the tree while it runs, so the group
        // cannot reach it. Check it here, the group clears the rest.
        self.checked = true;
        let value = ctx.element().user_value;
        if let Err(err) = RadioButtonGroup::select(ctx.tree_mut(), group, value) {
            ctx.tree().log(
                LogLevel::Warn,
                "radio_select_failed",
                [json_kv("value", json!(value)), json_kv("error", json!(err.to_string()))],
            );
        }
        EventFlow::Consumed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

type SelectedHook = Box<dyn FnMut(ElementId, u64)>;

/// Vertical list of radio buttons with at most one checked.
#[derive(Default)]
pub struct RadioButtonGroup {
    selected: Option<u64>,
    on_pressed: Option<SelectedHook>,
}

impl RadioButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-grid column that grows one row per added button.
    pub fn element() -> Element {
        Element::new()
            .with_auto_grid(Orientation::Vertical)
            .with_behavior(Self::new())
    }

    /// Called with the chosen button and its value after each selection.
    pub fn on_pressed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(ElementId, u64) + 'static,
    {
        self.on_pressed = Some(Box::new(hook));
        self
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    /// Append a labelled button on the next row of `group`.
    pub fn add(
        tree: &mut ElementTree,
        group: ElementId,
        label: impl Into<String>,
        value: u64,
        font: Option<ResourceId>,
    ) -> Result<ElementId> {
        let row = u32::try_from(tree.get(group)?.child_count()).unwrap_or(u32::MAX);
        let button = tree.create(RadioButton::element(label, value, font).with_pos(0, row));
        if let Err(err) = tree.attach(group, button) {
            tree.destroy(button)?;
            return Err(err);
        }
        Ok(button)
    }

    /// Check the button of `group` carrying `value` and uncheck the others.
    /// Returns false when no button carries `value`.
    pub fn select(tree: &mut ElementTree, group: ElementId, value: u64) -> Result<bool> {
        let mut chosen = None;
        for child in tree.children(group)?.to_vec() {
            let node = tree.get(child)?;
            let matches = node.user_value == value;
            // A lifted behavior is the button dispatching this selection.
            let running = node.class_id().is_none();
            if let Some(button) = tree.behavior_mut::<RadioButton>(child) {
                button.set_checked(matches);
            } else if !running {
                continue;
            }
            if matches && chosen.is_none() {
                chosen = Some(child);
            }
        }

        let Some(chosen) = chosen else {
            return Ok(false);
        };
        if let Some(state) = tree.behavior_mut::<RadioButtonGroup>(group) {
            state.selected = Some(value);
            if let Some(hook) = state.on_pressed.as_mut() {
                hook(chosen, value);
            }
        }
        Ok(true)
    }
}

impl Behavior for RadioButtonGroup {
    fn class_id(&self) -> &'static str {
        "radio-button-group"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;
    use crate::logging::{Logger, MemorySink};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn checked(tree: &ElementTree, id: ElementId) -> bool {
        tree.behavior::<RadioButton>(id).unwrap().is_checked()
    }

    #[test]
    fn add_stacks_buttons_vertically() {
        let mut tree = ElementTree::new();
        let group = tree.create(RadioButtonGroup::element());
        let ids: Vec<_> = ["Low", "Mid", "High"]
            .iter()
            .enumerate()
            .map(|(i, label)| RadioButtonGroup::add(&mut tree, group, *label, i as u64, Some(1)).unwrap())
            .collect();
        tree.layout(group, Rectangle::new(0.0, 0.0, 100.0, 300.0)).unwrap();

        assert_eq!(tree.get(group).unwrap().grid, (1, 3));
        assert_eq!(tree.get(ids[2]).unwrap().pos, (0, 2));
        assert!(tree
            .content_rect(ids[1])
            .unwrap()
            .approx_eq(&Rectangle::new(0.0, 100.0, 100.0, 200.0)));
    }

    #[test]
    fn select_checks_exactly_one() {
        let mut tree = ElementTree::new();
        let group = tree.create(RadioButtonGroup::element());
        let a = RadioButtonGroup::add(&mut tree, group, "A", 10, None).unwrap();
        let b = RadioButtonGroup::add(&mut tree, group, "B", 20, None).unwrap();

        assert!(RadioButtonGroup::select(&mut tree, group, 20).unwrap());
        assert!(!checked(&tree, a));
        assert!(checked(&tree, b));
        assert!(!RadioButtonGroup::select(&mut tree, group, 99).unwrap());
        assert_eq!(tree.behavior::<RadioButtonGroup>(group).unwrap().selected(), Some(20));
    }

    #[test]
    fn select_on_a_destroyed_group_is_an_error() {
        let mut tree = ElementTree::new();
        let group = tree.create(RadioButtonGroup::element());
        RadioButtonGroup::add(&mut tree, group, "A", 1, None).unwrap();
        tree.destroy(group).unwrap();
        assert!(matches!(
            RadioButtonGroup::select(&mut tree, group, 1),
            Err(UiError::ElementNotFound(id)) if id == group
        ));
    }

    #[test]
    fn tapping_logs_no_selection_failure() {
        let sink = MemorySink::new();
        let mut tree = ElementTree::new().with_logger(Logger::new(sink.clone()));
        let group = tree.create(RadioButtonGroup::element());
        let a = RadioButtonGroup::add(&mut tree, group, "A", 1, Some(1)).unwrap();
        tree.layout(group, Rectangle::new(0.0, 0.0, 100.0, 100.0)).unwrap();

        tree.cursor_event(group, 10.0, 50.0, true, false).unwrap();
        assert!(checked(&tree, a));
        assert!(!sink.messages().iter().any(|m| m == "radio_select_failed"));
    }

    #[test]
    fn tapping_a_button_selects_it() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tree = ElementTree::new();
        let group = tree.create(
            RadioButtonGroup::element()
                .with_behavior(RadioButtonGroup::new().on_pressed(move |id, value| sink.borrow_mut().push((id, value)))),
        );
        let a = RadioButtonGroup::add(&mut tree, group, "A", 1, Some(1)).unwrap();
        let b = RadioButtonGroup::add(&mut tree, group, "B", 2, Some(1)).unwrap();
        tree.layout(group, Rectangle::new(0.0, 0.0, 100.0, 200.0)).unwrap();

        tree.cursor_event(group, 10.0, 150.0, true, false).unwrap();
        assert!(checked(&tree, b));
        assert!(!checked(&tree, a));

        let flow = tree.cursor_event(group, 10.0, 50.0, true, false).unwrap();
        assert!(flow.is_consumed());
        assert!(checked(&tree, a));
        assert!(!checked(&tree, b));
        assert_eq!(*seen.borrow(), vec![(b, 2), (a, 1)]);
    }
}
