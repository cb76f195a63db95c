//! Visual attributes attached to every element.
//!
//! `Style` is plain data. The only rule it carries is that a colour with a
//! zero alpha switches the matching feature off, so background, border and
//! foreground can be toggled independently.

use serde::Serialize;

/// Backend handle for a font or texture. Produced by a [`crate::ResourceMap`].
pub type ResourceId = u32;

/// 32-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Colour(pub u32);

impl Colour {
    pub const NONE: Colour = Colour(0);
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const GREY: Colour = Colour::rgb(150, 150, 150);
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const GREEN: Colour = Colour::rgb(0, 255, 0);
    pub const DARK_GREEN: Colour = Colour::rgb(0, 127, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const LIGHT_GREY: Colour = Colour::rgb(200, 200, 200);
    pub const DARK_GREY: Colour = Colour::rgb(100, 100, 100);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Colour(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn from_argb(argb: u32) -> Self {
        Colour(argb)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Colour(((alpha as u32) << 24) | (self.0 & 0x00ff_ffff))
    }

    pub const fn is_visible(self) -> bool {
        self.alpha() > 0
    }

    /// Parse `#RRGGBB`, `#AARRGGBB` or one of the named constants.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix('#') {
            let value = u32::from_str_radix(hex, 16).ok()?;
            return match hex.len() {
                6 => Some(Colour(0xff00_0000 | value)),
                8 => Some(Colour(value)),
                _ => None,
            };
        }

        let named = match text.to_ascii_lowercase().as_str() {
            "none" | "transparent" => Colour::NONE,
            "black" => Colour::BLACK,
            "white" => Colour::WHITE,
            "grey" | "gray" => Colour::GREY,
            "red" => Colour::RED,
            "green" => Colour::GREEN,
            "dark_green" => Colour::DARK_GREEN,
            "blue" => Colour::BLUE,
            "light_grey" | "light_gray" => Colour::LIGHT_GREY,
            "dark_grey" | "dark_gray" => Colour::DARK_GREY,
            _ => return None,
        };
        Some(named)
    }
}

/// Placement of content along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlignEdge {
    Min,
    #[default]
    Center,
    Max,
}

/// Where content sits inside a content rectangle. Resolved by the graphics
/// backend, never by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Alignment {
    pub horizontal: AlignEdge,
    pub vertical: AlignEdge,
}

impl Alignment {
    pub const LEFT_TOP: Alignment = Alignment::new(AlignEdge::Min, AlignEdge::Min);
    pub const CENTER_TOP: Alignment = Alignment::new(AlignEdge::Center, AlignEdge::Min);
    pub const RIGHT_TOP: Alignment = Alignment::new(AlignEdge::Max, AlignEdge::Min);
    pub const LEFT_CENTER: Alignment = Alignment::new(AlignEdge::Min, AlignEdge::Center);
    pub const CENTER_CENTER: Alignment = Alignment::new(AlignEdge::Center, AlignEdge::Center);
    pub const RIGHT_CENTER: Alignment = Alignment::new(AlignEdge::Max, AlignEdge::Center);
    pub const LEFT_BOTTOM: Alignment = Alignment::new(AlignEdge::Min, AlignEdge::Max);
    pub const CENTER_BOTTOM: Alignment = Alignment::new(AlignEdge::Center, AlignEdge::Max);
    pub const RIGHT_BOTTOM: Alignment = Alignment::new(AlignEdge::Max, AlignEdge::Max);

    pub const fn new(horizontal: AlignEdge, vertical: AlignEdge) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parse names such as `LEFT_TOP` or `center_center`.
    pub fn parse(text: &str) -> Option<Self> {
        let alignment = match text.to_ascii_uppercase().as_str() {
            "LEFT_TOP" => Self::LEFT_TOP,
            "CENTER_TOP" => Self::CENTER_TOP,
            "RIGHT_TOP" => Self::RIGHT_TOP,
            "LEFT_CENTER" => Self::LEFT_CENTER,
            "CENTER_CENTER" | "CENTER" => Self::CENTER_CENTER,
            "RIGHT_CENTER" => Self::RIGHT_CENTER,
            "LEFT_BOTTOM" => Self::LEFT_BOTTOM,
            "CENTER_BOTTOM" => Self::CENTER_BOTTOM,
            "RIGHT_BOTTOM" => Self::RIGHT_BOTTOM,
            _ => return None,
        };
        Some(alignment)
    }
}

/// How a border is shaded. Only has an effect when the border is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BorderStyle {
    #[default]
    Solid,
    Raised,
    Depressed,
}

impl BorderStyle {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "SOLID" => Some(Self::Solid),
            "RAISED" => Some(Self::Raised),
            "DEPRESSED" => Some(Self::Depressed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub foreground: Colour,
    pub background: Colour,
    pub border: Colour,
    /// Corner radius applied when the background is painted.
    pub radius: f32,
    /// Border width in pixels, also used as line thickness.
    pub thickness: f32,
    pub border_style: BorderStyle,
    pub alignment: Alignment,
    pub font: Option<ResourceId>,
    /// Scaled to the content rect, modulated by the background colour.
    pub texture: Option<ResourceId>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            foreground: Colour::WHITE,
            background: Colour::NONE,
            border: Colour::NONE,
            radius: 0.0,
            thickness: 0.0,
            border_style: BorderStyle::Solid,
            alignment: Alignment::CENTER_CENTER,
            font: None,
            texture: None,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Background fill with rounded corners.
    pub fn filled(background: Colour, radius: f32) -> Self {
        Self {
            background,
            radius,
            ..Self::default()
        }
    }

    /// Shaded frame as used by push-style controls.
    pub fn framed(background: Colour, border_style: BorderStyle, thickness: f32, radius: f32) -> Self {
        Self {
            background,
            border: Colour::WHITE,
            border_style,
            thickness,
            radius,
            ..Self::default()
        }
    }

    pub fn paints_background(&self) -> bool {
        self.background.is_visible()
    }

    pub fn paints_border(&self) -> bool {
        self.border.is_visible() && self.thickness > 0.0
    }

    pub fn paints_foreground(&self) -> bool {
        self.foreground.is_visible()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// True when a rectangle draw call would put anything on screen.
    pub fn paints_rectangle(&self) -> bool {
        self.paints_background() || self.paints_border() || self.has_texture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_paints_nothing_but_text() {
        let style = Style::default();
        assert!(!style.paints_background());
        assert!(!style.paints_border());
        assert!(!style.paints_rectangle());
        assert!(style.paints_foreground());
    }

    #[test]
    fn border_needs_colour_and_thickness() {
        let mut style = Style {
            border: Colour::BLACK,
            ..Style::default()
        };
        assert!(!style.paints_border());
        style.thickness = 2.0;
        assert!(style.paints_border());
        style.border = Colour::BLACK.with_alpha(0);
        assert!(!style.paints_border());
    }

    #[test]
    fn colour_channels_round_trip() {
        let colour = Colour::rgba(1, 2, 3, 4);
        assert_eq!(
            (colour.red(), colour.green(), colour.blue(), colour.alpha()),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn colour_parse_formats() {
        assert_eq!(Colour::parse("#ff0000"), Some(Colour::RED));
        assert_eq!(Colour::parse("#00ff0000"), Some(Colour::RED.with_alpha(0)));
        assert_eq!(Colour::parse("light_grey"), Some(Colour::LIGHT_GREY));
        assert_eq!(Colour::parse("#12"), None);
        assert_eq!(Colour::parse("mauve"), None);
    }

    #[test]
    fn alignment_and_border_names() {
        assert_eq!(Alignment::parse("left_center"), Some(Alignment::LEFT_CENTER));
        assert_eq!(BorderStyle::parse("RAISED"), Some(BorderStyle::Raised));
        assert_eq!(BorderStyle::parse("bevel"), None);
    }
}
