// crates/dino_plugin/src/canvas.rs
//! Capabilities the game needs from whoever hosts it. The FFI shims implement
//! these on top of `HostInterface`; tests implement them with recorders.

use engine_shared::{Color, ImageHandle, Rect, TextAlign};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("image not found `{path}`")]
    NotFound { path: String },
}

pub trait AssetResolver {
    fn resolve_image(&mut self, path: &str) -> Result<ImageHandle, AssetError>;
}

/// Color and optional clip applied to one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: Color,
    pub clip: Option<Rect>,
}

impl Style {
    pub const fn tint(color: Color) -> Self {
        Self { color, clip: None }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::tint(Color::WHITE)
    }
}

pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, style: Style);
    fn textured_rect(&mut self, rect: Rect, image: ImageHandle, uv: Rect, style: Style);
    fn text(&mut self, rect: Rect, text: &str, font_size: f32, align: TextAlign, style: Style);
    fn text_width(&mut self, text: &str, font_size: f32) -> f32;
}
