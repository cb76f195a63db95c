use std::any::Any;

use crate::element::{Behavior, Element, ElementContext, EventFlow};
use crate::geometry::Point;
use crate::style::{BorderStyle, ResourceId};

use super::control_style;

type PressedHook = Box<dyn FnMut(&mut ElementContext<'_>)>;

/// Push button. The border shows depressed while the cursor is down and
/// raised once released. Touches are never consumed, so elements behind the
/// button still see them.
#[derive(Default)]
pub struct Button {
    on_pressed: Option<PressedHook>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labelled button element with the stock raised frame.
    pub fn element(label: impl Into<String>, font: Option<ResourceId>) -> Element {
        let mut element = Element::new()
            .with_text(label)
            .with_style(control_style())
            .with_behavior(Self::new());
        element.font = font;
        element
    }

    /// Called on each press that is not a drag.
    pub fn on_pressed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ElementContext<'_>) + 'static,
    {
        self.on_pressed = Some(Box::new(hook));
        self
    }
}

impl Behavior for Button {
    fn class_id(&self) -> &'static str {
        "button"
    }

    fn on_touched(
        &mut self,
        ctx: &mut ElementContext<'_>,
        _local: Point,
        pressed: bool,
        moving: bool,
    ) -> EventFlow {
        ctx.element_mut().style.border_style = if pressed {
            BorderStyle::Depressed
        } else {
            BorderStyle::Raised
        };

        if pressed && !moving {
            if let Some(hook) = self.on_pressed.as_mut() {
                hook(ctx);
            }
        }
        EventFlow::Continue
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
