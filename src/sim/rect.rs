//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows to the right, y grows downward. Every collision in
//! the simulation is a rectangle overlap test, there is no rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Middle of the bottom edge (where a sprite's feet are)
    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    pub fn set_left(&mut self, left: f32) {
        self.left = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.left = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.top = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.top = bottom - self.height;
    }

    /// Position the rect so its mid-bottom sits on `point`
    pub fn set_mid_bottom(&mut self, point: Vec2) {
        self.left = point.x - self.width / 2.0;
        self.top = point.y - self.height;
    }

    /// Move in place
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.top += dy;
    }

    /// Grow (or shrink, with negative amounts) around the center
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        Rect::new(
            self.left - dw / 2.0,
            self.top - dh / 2.0,
            self.width + dw,
            self.height + dh,
        )
    }

    /// Strict overlap test: rects that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// True if `other` lies entirely inside this rect (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right() <= self.right()
            && other.top >= self.top
            && other.bottom() <= self.bottom()
    }

    /// True if the horizontal extents overlap
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right() && other.left < self.right()
    }
}
