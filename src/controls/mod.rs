//! Stock controls built on the [`Behavior`](crate::element::Behavior) hooks.

mod button;
mod checkbox;
mod radio;
mod slider;

pub use button::Button;
pub use checkbox::Checkbox;
pub use radio::{RadioButton, RadioButtonGroup};
pub use slider::Slider;

use crate::element::{ElementContext, EventFlow};
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::graphics::Graphics;
use crate::style::{Alignment, BorderStyle, Colour, Style};

/// Frame shared by the push and toggle controls.
pub(crate) fn control_style() -> Style {
    Style::framed(Colour::LIGHT_GREY, BorderStyle::Raised, 5.0, 0.1)
}

/// Tick colour and line width for toggle controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TickStyle {
    pub colour: Colour,
    pub thickness: f32,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            colour: Colour::WHITE,
            thickness: 3.0,
        }
    }
}

/// Square box on the left, tick when checked, label to the right of the box.
/// Children are not drawn.
pub(crate) fn draw_toggle(
    ctx: &mut ElementContext<'_>,
    graphics: &mut dyn Graphics,
    content: Rectangle,
    checked: bool,
    tick: TickStyle,
) -> Result<EventFlow> {
    let element = ctx.element();
    let style = element.style;
    let square = content.squared();

    if style.paints_rectangle() {
        graphics.draw_rectangle(square, &style);
    }
    if checked {
        graphics.draw_tick(square, tick.colour, tick.thickness);
    }

    if !element.text.is_empty() {
        let font = ctx.resolve_font()?;
        let left = square.left + square.width() * 1.1;
        let label = Rectangle::new(left, content.top, content.right, content.bottom);
        if style.paints_foreground() {
            graphics.font_print(
                font,
                label,
                Alignment::LEFT_CENTER,
                style.foreground,
                &ctx.element().text,
            );
        }
    }
    Ok(EventFlow::Consumed)
}
