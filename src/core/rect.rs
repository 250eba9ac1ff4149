//! Axis-Aligned Rectangles
//!
//! Screen-space rectangles with y growing downward, matching the
//! coordinate system of the sprite layer.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle (left/top corner plus size).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Rectangle whose bottom edge is centered on `anchor`.
    #[inline]
    pub fn from_midbottom(anchor: Vec2, width: f32, height: f32) -> Self {
        Self::new(anchor.x - width / 2.0, anchor.y - height, width, height)
    }

    /// Rectangle centered on `center`.
    #[inline]
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// True if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Overlap test.
    ///
    /// Edges that merely touch do not count, and an empty rectangle never
    /// intersects anything.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    /// Same rectangle shifted horizontally by `-offset` (world to screen).
    #[inline]
    pub fn shifted_x(&self, offset: f32) -> Self {
        Self { left: self.left - offset, ..*self }
    }
}
