//! Facade over the rendering backend.
//!
//! The tree never rasterises anything itself. It hands resolved rectangles
//! and styles to a [`Graphics`] implementation supplied by the host.

use serde::Serialize;

use crate::geometry::Rectangle;
use crate::style::{Alignment, Colour, ResourceId, Style};

/// Rendering backend consumed by `draw` and by hosts resolving the root rect.
pub trait Graphics {
    fn display_rect(&self) -> Rectangle;

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {}

    fn draw_rectangle(&mut self, rect: Rectangle, style: &Style);

    fn font_print(
        &mut self,
        font: ResourceId,
        rect: Rectangle,
        alignment: Alignment,
        colour: Colour,
        text: &str,
    );

    /// Check mark inside `rect`, used by toggle controls.
    fn draw_tick(&mut self, _rect: Rectangle, _colour: Colour, _thickness: f32) {}
}

/// One call made against a [`RecordingGraphics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    BeginFrame,
    EndFrame,
    Rectangle {
        rect: Rectangle,
        style: Style,
    },
    Text {
        font: ResourceId,
        rect: Rectangle,
        alignment: Alignment,
        colour: Colour,
        text: String,
    },
    Tick {
        rect: Rectangle,
        colour: Colour,
        thickness: f32,
    },
}

/// Headless backend that records every call in order.
#[derive(Debug, Clone)]
pub struct RecordingGraphics {
    display: Rectangle,
    commands: Vec<DrawCommand>,
}

impl RecordingGraphics {
    pub fn new(display: Rectangle) -> Self {
        Self {
            display,
            commands: Vec::new(),
        }
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(Rectangle::from_xywh(0.0, 0.0, width, height))
    }

    pub fn set_display(&mut self, display: Rectangle) {
        self.display = display;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text strings printed so far, in draw order.
    pub fn printed_text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Graphics for RecordingGraphics {
    fn display_rect(&self) -> Rectangle {
        self.display
    }

    fn begin_frame(&mut self) {
        self.commands.push(DrawCommand::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.commands.push(DrawCommand::EndFrame);
    }

    fn draw_rectangle(&mut self, rect: Rectangle, style: &Style) {
        self.commands.push(DrawCommand::Rectangle {
            rect,
            style: *style,
        });
    }

    fn font_print(
        &mut self,
        font: ResourceId,
        rect: Rectangle,
        alignment: Alignment,
        colour: Colour,
        text: &str,
    ) {
        self.commands.push(DrawCommand::Text {
            font,
            rect,
            alignment,
            colour,
            text: text.to_string(),
        });
    }

    fn draw_tick(&mut self, rect: Rectangle, colour: Colour, thickness: f32) {
        self.commands.push(DrawCommand::Tick {
            rect,
            colour,
            thickness,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_call_order() {
        let mut gfx = RecordingGraphics::with_size(10.0, 10.0);
        gfx.begin_frame();
        gfx.draw_rectangle(gfx.display_rect(), &Style::filled(Colour::RED, 0.0));
        gfx.font_print(1, gfx.display_rect(), Alignment::CENTER_CENTER, Colour::WHITE, "hi");
        gfx.end_frame();

        let commands = gfx.take_commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::BeginFrame);
        assert!(matches!(commands[1], DrawCommand::Rectangle { .. }));
        assert_eq!(commands[3], DrawCommand::EndFrame);
        assert!(gfx.commands().is_empty());
    }
}
