// crates/dino_plugin/src/assets.rs
use engine_shared::{ImageHandle, PLACEHOLDER_IMAGE};
use tracing::{info, warn};

use crate::canvas::AssetResolver;
use crate::catalog::ImageId;

/// Host image slots for every `ImageId`, resolved once per (re)load.
#[derive(Clone, Debug)]
pub struct ImageTable {
    handles: [ImageHandle; ImageId::COUNT],
}

impl Default for ImageTable {
    fn default() -> Self {
        Self {
            handles: [PLACEHOLDER_IMAGE; ImageId::COUNT],
        }
    }
}

impl ImageTable {
    /// Resolves every image. Missing ones are reported and fall back to the
    /// placeholder art (or the host's built-in placeholder if that is missing too).
    pub fn load(resolver: &mut dyn AssetResolver) -> Self {
        let mut table = Self::default();
        let mut missing = 0usize;

        // `Placeholder` is first in `ALL`, so it is bound before anything needs it.
        for &id in ImageId::ALL {
            table.handles[id as usize] = match resolver.resolve_image(id.path()) {
                Ok(handle) => handle,
                Err(err) => {
                    warn!(%err, "substituting placeholder");
                    missing += 1;
                    table.get(ImageId::Placeholder)
                }
            };
        }

        info!(total = ImageId::COUNT, missing, "images bound");
        table
    }

    pub fn get(&self, id: ImageId) -> ImageHandle {
        self.handles[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapResolver;

    #[test]
    fn missing_images_use_the_placeholder_art() {
        let mut resolver = MapResolver::with_all_images();
        resolver.forget(ImageId::Fish.path());
        let placeholder = resolver.handle_of(ImageId::Placeholder.path());

        let table = ImageTable::load(&mut resolver);
        assert_eq!(table.get(ImageId::Fish), placeholder);
        assert_ne!(table.get(ImageId::Meat), placeholder);
    }

    #[test]
    fn missing_placeholder_falls_back_to_host_slot() {
        let mut resolver = MapResolver::default();
        let table = ImageTable::load(&mut resolver);
        assert_eq!(table.get(ImageId::Placeholder), PLACEHOLDER_IMAGE);
        assert_eq!(table.get(ImageId::Background0), PLACEHOLDER_IMAGE);
    }
}
