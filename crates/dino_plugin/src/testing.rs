// crates/dino_plugin/src/testing.rs
//! Test doubles for the host capabilities.

use std::collections::HashMap;

use engine_shared::{ImageHandle, Rect, TextAlign};

use crate::canvas::{AssetError, AssetResolver, Canvas, Style};
use crate::catalog::ImageId;

/// Resolves from a fixed path table.
#[derive(Default)]
pub struct MapResolver {
    handles: HashMap<String, ImageHandle>,
}

impl MapResolver {
    /// Every catalog image, with handles 1.. in catalog order.
    pub fn with_all_images() -> Self {
        let handles = ImageId::ALL
            .iter()
            .enumerate()
            .map(|(i, id)| (id.path().to_string(), i as ImageHandle + 1))
            .collect();
        Self { handles }
    }

    pub fn forget(&mut self, path: &str) {
        self.handles.remove(path);
    }

    pub fn handle_of(&self, path: &str) -> ImageHandle {
        self.handles[path]
    }
}

impl AssetResolver for MapResolver {
    fn resolve_image(&mut self, path: &str) -> Result<ImageHandle, AssetError> {
        self.handles
            .get(path)
            .copied()
            .ok_or_else(|| AssetError::NotFound { path: path.to_string() })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fill { rect: Rect, style: Style },
    Textured { rect: Rect, image: ImageHandle, uv: Rect, style: Style },
    Text { rect: Rect, text: String, font_size: f32, align: TextAlign, style: Style },
}

/// Records every draw. Text is half a font size wide per char.
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    /// Images of textured draws, in draw order.
    pub fn images(&self) -> impl Iterator<Item = ImageHandle> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Textured { image, .. } => Some(*image),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Rect of the first textured draw of `image`.
    pub fn rect_of(&self, image: ImageHandle) -> Option<Rect> {
        self.ops.iter().find_map(|op| match op {
            Op::Textured { rect, image: i, .. } if *i == image => Some(*rect),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, style: Style) {
        self.ops.push(Op::Fill { rect, style });
    }

    fn textured_rect(&mut self, rect: Rect, image: ImageHandle, uv: Rect, style: Style) {
        self.ops.push(Op::Textured { rect, image, uv, style });
    }

    fn text(&mut self, rect: Rect, text: &str, font_size: f32, align: TextAlign, style: Style) {
        self.ops.push(Op::Text {
            rect,
            text: text.to_string(),
            font_size,
            align,
            style,
        });
    }

    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * 0.5
    }
}
