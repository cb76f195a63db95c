use std::any::Any;

use crate::element::{Behavior, Element, ElementContext, EventFlow};
use crate::error::{Result, UiError};
use crate::geometry::{Point, Rectangle};
use crate::graphics::Graphics;
use crate::style::{Alignment, Colour, Style};

type ChangedHook = Box<dyn FnMut(i32)>;

/// Horizontal integer slider. The element background fills the control,
/// the foreground colour paints the track.
pub struct Slider {
    min: i32,
    max: i32,
    step: i32,
    value: i32,
    track: Rectangle,
    knob: Style,
    on_changed: Option<ChangedHook>,
}

impl Slider {
    /// Starts half way between `min` and `max`. A step below one is treated
    /// as one.
    pub fn new(min: i32, max: i32, step: i32) -> Result<Self> {
        if min >= max {
            return Err(UiError::InvalidRange { min, max });
        }
        let knob = Style {
            background: Colour::LIGHT_GREY,
            border: Colour::BLACK,
            thickness: 2.0,
            radius: 0.3,
            ..Style::default()
        };
        Ok(Self {
            min,
            max,
            step: step.max(1),
            value: (i64::from(min) + (i64::from(max) - i64::from(min)) / 2) as i32,
            track: Rectangle::default(),
            knob,
            on_changed: None,
        })
    }

    pub fn element(min: i32, max: i32, step: i32) -> Result<Element> {
        let style = Style {
            background: Colour::BLUE,
            foreground: Colour::DARK_GREY,
            alignment: Alignment::LEFT_TOP,
            ..Style::default()
        };
        Ok(Element::new()
            .with_style(style)
            .with_behavior(Self::new(min, max, step)?))
    }

    pub fn on_changed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(i32) + 'static,
    {
        self.on_changed = Some(Box::new(hook));
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Clamped to the range and snapped to the nearest step from `min`.
    pub fn set_value(&mut self, value: i32) {
        let offset = (i64::from(value.clamp(self.min, self.max)) - i64::from(self.min)) as f64;
        let steps = (offset / f64::from(self.step)).round() as i64;
        let snapped = i64::from(self.min) + steps * i64::from(self.step);
        self.value = snapped.min(i64::from(self.max)) as i32;
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Track rectangle cached by the last update.
    pub fn track(&self) -> Rectangle {
        self.track
    }

    fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    fn fraction(&self) -> f32 {
        ((i64::from(self.value) - i64::from(self.min)) as f64 / self.span() as f64) as f32
    }
}

impl Behavior for Slider {
    fn class_id(&self) -> &'static str {
        "slider"
    }

    fn on_update(&mut self, _ctx: &mut ElementContext<'_>, content: Rectangle) -> EventFlow {
        self.track = content.scaled(0.95, 0.1);
        EventFlow::Continue
    }

    fn on_draw(
        &mut self,
        ctx: &mut ElementContext<'_>,
        graphics: &mut dyn Graphics,
        content: Rectangle,
    ) -> Result<EventFlow> {
        let style = ctx.element().style;
        let track = Style {
            background: style.foreground,
            ..style
        };
        graphics.draw_rectangle(self.track, &track);

        let knob_width = content.width() * 0.1;
        let left = content.left + (content.width() - knob_width) * self.fraction();
        let knob = Rectangle::new(left, content.top, left + knob_width, content.bottom);
        graphics.draw_rectangle(knob, &self.knob);
        Ok(EventFlow::Continue)
    }

    fn on_touched(
        &mut self,
        ctx: &mut ElementContext<'_>,
        local: Point,
        pressed: bool,
        _moving: bool,
    ) -> EventFlow {
        if !pressed || self.track.width() <= 0.0 {
            return EventFlow::Continue;
        }

        let x = self.track.clamp_x(ctx.element().content_rect().left + local.x);
        let fraction = (x - self.track.left) / self.track.width();
        let previous = self.value;
        let target = i64::from(self.min) + (self.span() as f64 * f64::from(fraction)).round() as i64;
        self.set_value(target.clamp(i64::from(self.min), i64::from(self.max)) as i32);

        if self.value != previous {
            if let Some(hook) = self.on_changed.as_mut() {
                hook(self.value);
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
        Rectangle::new(0.0, 0.0, 200.0, 20.0)
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(matches!(
            Slider::new(5, 5, 1),
            Err(UiError::InvalidRange { min: 5, max: 5 })
        ));
    }

    #[test]
    fn starts_at_midpoint_and_snaps_to_step() {
        let mut slider = Slider::new(0, 100, 10).unwrap();
        assert_eq!(slider.value(), 50);
        slider.set_value(34);
        assert_eq!(slider.value(), 30);
        slider.set_value(250);
        assert_eq!(slider.value(), 100);
        slider.set_value(-4);
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn full_i32_range_does_not_overflow() {
        let mut slider = Slider::new(i32::MIN, i32::MAX, 1).unwrap();
        assert_eq!(slider.value(), 0);
        slider.set_value(i32::MAX);
        assert_eq!(slider.value(), i32::MAX);
        slider.set_value(i32::MIN);
        assert_eq!(slider.value(), i32::MIN);
        assert_eq!(slider.fraction(), 0.0);

        let mut tree = ElementTree::new();
        let element = tree.create(Slider::element(i32::MIN, i32::MAX, 1).unwrap());
        tree.layout(element, area()).unwrap();
        tree.update(element).unwrap();
        tree.cursor_event(element, 195.0, 10.0, true, false).unwrap();
        assert_eq!(tree.behavior::<Slider>(element).unwrap().value(), i32::MAX);
    }

    #[test]
    fn touch_maps_onto_track() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tree = ElementTree::new();
        let element = Slider::element(0, 100, 1)
            .unwrap()
            .with_behavior(Slider::new(0, 100, 1).unwrap().on_changed(move |v| sink.borrow_mut().push(v)));
        let slider = tree.create(element);
        tree.layout(slider, area()).unwrap();
        tree.update(slider).unwrap();

        let track = tree.behavior::<Slider>(slider).unwrap().track();
        assert!(track.approx_eq(&Rectangle::new(5.0, 9.0, 195.0, 11.0)));

        let flow = tree.cursor_event(slider, 195.0, 10.0, true, false).unwrap();
        assert!(flow.is_consumed());
        assert_eq!(tree.behavior::<Slider>(slider).unwrap().value(), 100);

        tree.cursor_event(slider, 1.0, 10.0, true, true).unwrap();
        assert_eq!(tree.behavior::<Slider>(slider).unwrap().value(), 0);

        tree.cursor_event(slider, 100.0, 10.0, false, false).unwrap();
        assert_eq!(*seen.borrow(), vec![100, 0]);
    }

    #[test]
    fn draws_background_track_and_knob() {
        let mut tree = ElementTree::new();
        let slider = tree.create(Slider::element(0, 10, 1).unwrap());
        tree.layout(slider, area()).unwrap();
        tree.update(slider).unwrap();

        let mut gfx = RecordingGraphics::new(area());
        tree.draw(slider, &mut gfx).unwrap();
        let rects: Vec<Rectangle> = gfx
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rectangle { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();

        assert_eq!(rects.len(), 3);
        assert!(rects[0].approx_eq(&area()));
        // Value 5 of 0..10 puts the knob half way along its travel.
        assert!(rects[2].approx_eq(&Rectangle::new(90.0, 0.0, 110.0, 20.0)));
    }
}
