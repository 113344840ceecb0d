//! Integer geometry and the uniform scale factor.
//!
//! Sprite sheets are authored at one resolution and scaled up at load time, so
//! every size and coordinate in the crate goes through [`ScaleFactor::apply`].
//! Only a strictly positive factor scales; zero, negative and NaN factors leave
//! values untouched.

use raylib::prelude::Rectangle;

/// An `(x, y)` coordinate pair in pixels.
pub type Pos = (i32, i32);

/// Uniform multiplier for sizes and coordinates.
///
/// Scaled values are truncated toward zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ScaleFactor(pub f64);

impl ScaleFactor {
    /// Factor that leaves everything as authored.
    pub const IDENTITY: Self = Self(1.0);

    pub fn new(factor: f64) -> Self {
        Self(factor)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this factor changes anything. Non-positive factors mean "no scaling".
    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }

    /// Scale a single integer quantity.
    pub fn apply(self, v: i32) -> i32 {
        self.apply_raw(v as f64)
    }

    /// Scale a raw, possibly fractional, value and truncate it to pixels.
    pub fn apply_raw(self, v: f64) -> i32 {
        if self.is_active() {
            (v * self.0) as i32
        } else {
            v as i32
        }
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<i32> for ScaleFactor {
    fn from(factor: i32) -> Self {
        Self(factor as f64)
    }
}

impl From<f64> for ScaleFactor {
    fn from(factor: f64) -> Self {
        Self(factor)
    }
}

/// Integer rectangle locating one frame inside a sprite sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn position(&self) -> Pos {
        (self.x, self.y)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        Self { x, y, w, h }
    }
}

impl From<Rect> for (i32, i32, i32, i32) {
    fn from(r: Rect) -> Self {
        (r.x, r.y, r.w, r.h)
    }
}

/// Source rectangle for raylib draw calls.
impl From<Rect> for Rectangle {
    fn from(r: Rect) -> Self {
        Rectangle::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
    }
}

impl From<Rectangle> for Rect {
    fn from(r: Rectangle) -> Self {
        Self {
            x: r.x as i32,
            y: r.y as i32,
            w: r.width as i32,
            h: r.height as i32,
        }
    }
}

/// Scale an `(x, y)` position.
pub fn scale_pos(pos: Pos, scale: ScaleFactor) -> Pos {
    (scale.apply(pos.0), scale.apply(pos.1))
}

/// Scale every component of a single rectangle.
pub fn scale_rect(rect: Rect, scale: ScaleFactor) -> Rect {
    Rect {
        x: scale.apply(rect.x),
        y: scale.apply(rect.y),
        w: scale.apply(rect.w),
        h: scale.apply(rect.h),
    }
}

/// Scale a sequence of rectangles, keeping length and order.
pub fn scale_rects(rects: &[Rect], scale: ScaleFactor) -> Vec<Rect> {
    rects.iter().map(|r| scale_rect(*r, scale)).collect()
}
