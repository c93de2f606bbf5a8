// crates/engine_shared/src/input_types.rs
//! Per-frame input snapshot handed from host to plugin.

use glam::Vec2;

use crate::geometry::Rect;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Area the plugin may draw into, in logical points.
    pub viewport: Rect,

    /// Seconds since the previous tick.
    pub dt: f32,

    /// Last known pointer position. Stays where it was when the pointer leaves the window.
    pub pointer: Vec2,

    /// True only on the frame the primary button went down.
    pub primary_pressed: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            viewport: Rect::default(),
            dt: 0.0,
            pointer: Vec2::ZERO,
            primary_pressed: false,
        }
    }
}

impl FrameInput {
    /// Pointer x as a fraction of the viewport width, clamped to 0..=1.
    pub fn pointer_rel_x(&self) -> f32 {
        if self.viewport.w <= 0.0 {
            return 0.5;
        }
        ((self.pointer.x - self.viewport.x) / self.viewport.w).clamp(0.0, 1.0)
    }
}
