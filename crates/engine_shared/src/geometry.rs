// crates/engine_shared/src/geometry.rs
//! Screen-space rectangles and colors shared by host and plugin.
//!
//! Everything here is `repr(C)` so it can cross the plugin boundary by value.
//! Coordinates are logical points, origin top-left, y growing downwards.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Full texture coordinates.
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Zero-sized rect at `p`. Handy as the target of [`Rect::centered`].
    pub const fn at(p: Vec2) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn with_w(self, w: f32) -> Self {
        Self { w, ..self }
    }

    /// Shrinks by `dx`/`dy` on every side. Negative values grow the rect.
    pub fn inset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w - 2.0 * dx, self.h - 2.0 * dy)
    }

    /// A `w` x `h` rect centred inside `self`.
    pub fn centered(self, w: f32, h: f32) -> Self {
        Self::new(
            self.x + (self.w - w) / 2.0,
            self.y + (self.h - h) / 2.0,
            w,
            h,
        )
    }

    /// Returns `(left, rest)` where `left` is `w` wide and `rest` starts `margin` after it.
    pub fn split_left(self, w: f32, margin: f32) -> (Self, Self) {
        let left = Self { w, ..self };
        let rest = Self::new(self.x + w + margin, self.y, self.w - w - margin, self.h);
        (left, rest)
    }

    /// Returns `(rest, right)` where `right` is the rightmost `w` points.
    pub fn split_right(self, w: f32, margin: f32) -> (Self, Self) {
        let right = Self::new(self.right() - w, self.y, w, self.h);
        let rest = Self { w: self.w - w - margin, ..self };
        (rest, right)
    }

    /// Returns `(top, rest)`.
    pub fn split_top(self, h: f32, margin: f32) -> (Self, Self) {
        let top = Self { h, ..self };
        let rest = Self::new(self.x, self.y + h + margin, self.w, self.h - h - margin);
        (top, rest)
    }

    /// Returns `(rest, bottom)`.
    pub fn split_bottom(self, h: f32, margin: f32) -> (Self, Self) {
        let bottom = Self::new(self.x, self.bottom() - h, self.w, h);
        let rest = Self { h: self.h - h - margin, ..self };
        (rest, bottom)
    }

    /// Cuts the bottom `h` points off `self` (plus `margin`) and returns them.
    pub fn split_off_bottom(&mut self, h: f32, margin: f32) -> Self {
        let (rest, bottom) = self.split_bottom(h, margin);
        *self = rest;
        bottom
    }

    /// Column `i` of `n` equal columns separated by `margin`.
    pub fn divide_x(self, margin: f32, n: u32, i: u32) -> Self {
        let n = n.max(1) as f32;
        let cell_w = (self.w - margin * (n - 1.0)) / n;
        Self::new(self.x + i as f32 * (cell_w + margin), self.y, cell_w, self.h)
    }

    /// Row `i` of `n` equal rows separated by `margin`.
    pub fn divide_y(self, margin: f32, n: u32, i: u32) -> Self {
        let n = n.max(1) as f32;
        let cell_h = (self.h - margin * (n - 1.0)) / n;
        Self::new(self.x, self.y + i as f32 * (cell_h + margin), self.w, cell_h)
    }
}

/// 8-bit sRGB color with straight alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
