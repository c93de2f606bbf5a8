// crates/engine_core/src/assets.rs
//! Images handed out to the plugin by handle.
//!
//! Slot 0 is a built-in checkerboard so a handle always draws something.
//! Pixels are decoded on `resolve` and uploaded to egui the first time they
//! are drawn.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use egui::{Color32, ColorImage, TextureHandle, TextureId, TextureOptions};
use engine_shared::{ImageHandle, PLACEHOLDER_IMAGE};
use image::ImageReader;
use tracing::debug;

use crate::error::AssetError;

struct ImageSlot {
    name: String,
    /// Decoded pixels waiting for their first upload.
    pixels: Option<ColorImage>,
    texture: Option<TextureHandle>,
}

pub struct AssetStore {
    root: PathBuf,
    slots: Vec<ImageSlot>,
    by_path: HashMap<String, ImageHandle>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let placeholder = ImageSlot {
            name: "placeholder".to_string(),
            pixels: Some(checkerboard()),
            texture: None,
        };
        Self {
            root: root.into(),
            slots: vec![placeholder],
            by_path: HashMap::new(),
        }
    }

    /// Number of slots, placeholder included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Loads `path` (relative to the asset root) once; later calls return the same handle.
    pub fn resolve(&mut self, path: &str) -> Result<ImageHandle, AssetError> {
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }

        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(AssetError::OutsideRoot(path.to_string()));
        }

        let pixels = decode_png(&self.root.join(relative))?;
        let handle = self.slots.len() as ImageHandle;
        debug!(path, handle, size = ?pixels.size, "image loaded");

        self.slots.push(ImageSlot {
            name: path.to_string(),
            pixels: Some(pixels),
            texture: None,
        });
        self.by_path.insert(path.to_string(), handle);
        Ok(handle)
    }

    /// egui texture for `handle`, uploading on first use. Unknown handles get the placeholder.
    pub fn texture(&mut self, ctx: &egui::Context, handle: ImageHandle) -> TextureId {
        let index = if (handle as usize) < self.slots.len() {
            handle as usize
        } else {
            PLACEHOLDER_IMAGE as usize
        };
        let slot = &mut self.slots[index];

        if let Some(texture) = &slot.texture {
            return texture.id();
        }
        let pixels = slot.pixels.take().unwrap_or_else(checkerboard);
        let texture = ctx.load_texture(slot.name.clone(), pixels, TextureOptions::LINEAR);
        let id = texture.id();
        slot.texture = Some(texture);
        id
    }
}

fn decode_png(path: &Path) -> Result<ColorImage, AssetError> {
    let reader = ImageReader::open(path).map_err(|source| AssetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = reader
        .decode()
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn checkerboard() -> ColorImage {
    const SIDE: usize = 8;
    let pixels = (0..SIDE * SIDE)
        .map(|i| {
            if (i % SIDE + i / SIDE) % 2 == 0 {
                Color32::from_rgb(255, 0, 255)
            } else {
                Color32::BLACK
            }
        })
        .collect();
    ColorImage { size: [SIDE, SIDE], pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dino_assets_{name}_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("art")).unwrap();
        dir
    }

    #[test]
    fn resolve_caches_by_path() {
        let root = temp_root("cache");
        image::RgbaImage::new(2, 3).save(root.join("art/rock.png")).unwrap();

        let mut store = AssetStore::new(&root);
        let first = store.resolve("art/rock.png").unwrap();
        assert_eq!(first, 1);
        assert_eq!(store.resolve("art/rock.png").unwrap(), first);
        assert_eq!(store.len(), 2);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_and_escaping_paths_fail() {
        let root = temp_root("missing");
        let mut store = AssetStore::new(&root);

        assert!(matches!(store.resolve("art/nope.png"), Err(AssetError::Open { .. })));
        assert!(matches!(store.resolve("../secret.png"), Err(AssetError::OutsideRoot(_))));
        assert_eq!(store.len(), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn placeholder_is_a_checkerboard() {
        let img = checkerboard();
        assert_eq!(img.pixels.len(), 64);
        assert_ne!(img.pixels[0], img.pixels[1]);
        assert_eq!(img.pixels[0], img.pixels[9]);
    }
}
