use serde::Serialize;

const EPSILON: f32 = 1.0e-3;

/// Point in display or element-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis aligned box stored as edges.
///
/// Depending on where it is used the values are either absolute pixels or
/// fractions of a parent rectangle. `left <= right` and `top <= bottom` are
/// expected but never enforced; callers pass sane values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rectangle {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rectangle {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// The whole of a parent, as fractions.
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width() * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height() * 0.5
    }

    /// Inclusive on every edge.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// True when `other` lies inside this rectangle, allowing for float drift.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.left >= self.left - EPSILON
            && other.top >= self.top - EPSILON
            && other.right <= self.right + EPSILON
            && other.bottom <= self.bottom + EPSILON
    }

    /// Interpolate across the width. `0.0` is the left edge, `1.0` the right.
    pub fn get_x(&self, t: f32) -> f32 {
        self.left + (self.right - self.left) * t
    }

    /// Interpolate across the height. `0.0` is the top edge, `1.0` the bottom.
    pub fn get_y(&self, t: f32) -> f32 {
        self.top + (self.bottom - self.top) * t
    }

    /// Map a fractional rectangle onto this one.
    pub fn sub_rect(&self, fraction: &Rectangle) -> Rectangle {
        Rectangle::new(
            self.get_x(fraction.left),
            self.get_y(fraction.top),
            self.get_x(fraction.right),
            self.get_y(fraction.bottom),
        )
    }

    pub fn shrunk(&self, dx: f32, dy: f32) -> Rectangle {
        Rectangle::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    pub fn shrink(&mut self, dx: f32, dy: f32) {
        *self = self.shrunk(dx, dy);
    }

    /// Scale about the centre.
    pub fn scaled(&self, sx: f32, sy: f32) -> Rectangle {
        let half_w = self.width() * sx * 0.5;
        let half_h = self.height() * sy * 0.5;
        let cx = self.center_x();
        let cy = self.center_y();
        Rectangle::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Largest square that shares the left edge and vertical centre.
    pub fn squared(&self) -> Rectangle {
        let side = self.width().min(self.height());
        let top = self.center_y() - side * 0.5;
        Rectangle::new(self.left, top, self.left + side, top + side)
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right.max(self.left))
    }

    pub fn clamp_y(&self, y: f32) -> f32 {
        y.clamp(self.top, self.bottom.max(self.top))
    }

    pub fn approx_eq(&self, other: &Rectangle) -> bool {
        (self.left - other.left).abs() <= EPSILON
            && (self.top - other.top).abs() <= EPSILON
            && (self.right - other.right).abs() <= EPSILON
            && (self.bottom - other.bottom).abs() <= EPSILON
    }
}
