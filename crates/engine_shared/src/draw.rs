// crates/engine_shared/src/draw.rs
//! Flat 2D draw commands the plugin submits to the host, one call per primitive.

use crate::geometry::{Color, Rect};

/// Host-side image slot. Handles are only meaningful to the host that issued them.
pub type ImageHandle = u32;

/// Slot 0 always holds the host's built-in placeholder texture.
pub const PLACEHOLDER_IMAGE: ImageHandle = 0;

/// Returned by `HostInterface::resolve_image` when the asset does not exist.
pub const IMAGE_NOT_FOUND: ImageHandle = u32::MAX;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    FillRect = 0,
    TexturedRect = 1,
    Text = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// One primitive. Only the fields relevant to `kind` are read.
///
/// `text_ptr`/`text_len` borrow UTF-8 owned by the plugin; the host must copy
/// the text before `draw` returns.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub rect: Rect,
    pub uv: Rect,
    pub image: ImageHandle,
    pub color: Color,
    pub clip_enabled: bool,
    pub clip: Rect,
    pub font_size: f32,
    pub align: TextAlign,
    pub text_ptr: *const u8,
    pub text_len: usize,
}

impl DrawCommand {
    fn base(kind: DrawKind, rect: Rect, color: Color, clip: Option<Rect>) -> Self {
        Self {
            kind,
            rect,
            uv: Rect::UNIT,
            image: PLACEHOLDER_IMAGE,
            color,
            clip_enabled: clip.is_some(),
            clip: clip.unwrap_or_default(),
            font_size: 0.0,
            align: TextAlign::Left,
            text_ptr: core::ptr::null(),
            text_len: 0,
        }
    }

    pub fn fill(rect: Rect, color: Color, clip: Option<Rect>) -> Self {
        Self::base(DrawKind::FillRect, rect, color, clip)
    }

    pub fn textured(rect: Rect, image: ImageHandle, uv: Rect, color: Color, clip: Option<Rect>) -> Self {
        Self {
            image,
            uv,
            ..Self::base(DrawKind::TexturedRect, rect, color, clip)
        }
    }

    /// The returned command borrows `text`; it must not outlive it.
    pub fn text(
        rect: Rect,
        text: &str,
        font_size: f32,
        align: TextAlign,
        color: Color,
        clip: Option<Rect>,
    ) -> Self {
        Self {
            font_size,
            align,
            text_ptr: text.as_ptr(),
            text_len: text.len(),
            ..Self::base(DrawKind::Text, rect, color, clip)
        }
    }

    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_enabled.then_some(self.clip)
    }

    /// # Safety
    /// `text_ptr`/`text_len` must still point at the string the command was built from.
    pub unsafe fn text_str(&self) -> Option<&str> {
        if self.text_ptr.is_null() || self.text_len == 0 {
            return None;
        }
        let bytes = unsafe { core::slice::from_raw_parts(self.text_ptr, self.text_len) };
        core::str::from_utf8(bytes).ok()
    }
}
