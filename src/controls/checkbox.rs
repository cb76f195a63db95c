use std::any::Any;

use crate::element::{Behavior, Element, ElementContext, EventFlow};
use crate::error::Result;
use crate::geometry::{Point, Rectangle};
use crate::graphics::Graphics;
use crate::style::ResourceId;

use super::{TickStyle, control_style, draw_toggle};

type CheckedHook = Box<dyn FnMut(&mut ElementContext<'_>, bool)>;

/// Labelled box that flips between checked and unchecked on each tap.
#[derive(Default)]
pub struct Checkbox {
    checked: bool,
    tick: TickStyle,
    on_checked: Option<CheckedHook>,
}

impl Checkbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(label: impl Into<String>, font: Option<ResourceId>) -> Element {
        let mut element = Element::new()
            .with_text(label)
            .with_style(control_style())
            .with_behavior(Self::new());
        element.font = font;
        element
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Called after every toggle with the new state.
    pub fn on_checked<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>, bool) + 'static,
    {
        self.on_checked = Some(Box::new(hook));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Behavior for Checkbox {
    fn class_id(&self) -> &'static str {
        "check-box"
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
        if pressed && !moving {
            self.checked = !self.checked;
            if let Some(hook) = self.on_checked.as_mut() {
                hook(ctx, self.checked);
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementTree;
    use crate::graphics::{DrawCommand, RecordingGraphics};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn area() -> Rectangle {
        Rectangle::new(0.0, 0.0, 200.0, 40.0)
    }

    #[test]
    fn tap_toggles_and_drag_does_not() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tree = ElementTree::new();
        let check = tree.create(
            Checkbox::element("Wifi", Some(2))
                .with_behavior(Checkbox::new().on_checked(move |_ctx, on| sink.borrow_mut().push(on))),
        );
        tree.layout(check, area()).unwrap();

        assert!(tree.cursor_event(check, 5.0, 5.0, true, false).unwrap().is_consumed());
        tree.cursor_event(check, 6.0, 5.0, true, true).unwrap();
        tree.cursor_event(check, 6.0, 5.0, false, false).unwrap();
        tree.cursor_event(check, 5.0, 5.0, true, false).unwrap();

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!tree.behavior::<Checkbox>(check).unwrap().is_checked());
    }

    #[test]
    fn draws_box_tick_and_label_only() {
        let mut tree = ElementTree::new();
        let check = tree.create(
            Checkbox::element("Wifi", Some(2)).with_behavior(Checkbox::new().with_checked(true)),
        );
        let child = tree.create(Element::new().with_text("hidden"));
        tree.attach(check, child).unwrap();
        tree.layout(check, area()).unwrap();

        let mut gfx = RecordingGraphics::new(area());
        tree.draw(check, &mut gfx).unwrap();

        let commands = gfx.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            DrawCommand::Rectangle { rect, .. } if rect.approx_eq(&Rectangle::new(0.0, 0.0, 40.0, 40.0))
        ));
        assert!(matches!(commands[1], DrawCommand::Tick { .. }));
        assert!(matches!(
            commands[2],
            DrawCommand::Text { rect, ref text, .. } if text == "Wifi" && (rect.left - 44.0).abs() < 1.0e-3
        ));
    }
}
