use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only description of a loaded sprite-sheet image.
///
/// Loading pixels is the asset loader's job; the core only needs to know
/// which image a texture samples from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureImage {
    pub source: String,
}

impl TextureImage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// How UVs outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
}

/// Sampling window into a texture: `uv' = uv * repeat + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tiling {
    pub repeat: Vec2,
    pub offset: Vec2,
    pub wrap: WrapMode,
}

impl Default for Tiling {
    fn default() -> Self {
        Self {
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            wrap: WrapMode::Clamp,
        }
    }
}

/// A texture handle: shared image data plus this handle's own tiling state.
///
/// Cloning shares the image and copies the tiling, so two animations built
/// from the same source can scroll through the sheet independently.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTexture {
    image: Arc<TextureImage>,
    tiling: Tiling,
}

impl SpriteTexture {
    pub fn new(image: TextureImage) -> Self {
        Self::from_shared(Arc::new(image))
    }

    pub fn from_shared(image: Arc<TextureImage>) -> Self {
        Self {
            image,
            tiling: Tiling::default(),
        }
    }

    pub fn image(&self) -> &Arc<TextureImage> {
        &self.image
    }

    pub fn tiling(&self) -> Tiling {
        self.tiling
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.tiling.offset = offset;
    }

    pub fn set_repeat(&mut self, repeat: Vec2) {
        self.tiling.repeat = repeat;
    }

    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.tiling.wrap = wrap;
    }

    /// Whether both handles sample the same underlying image.
    pub fn shares_image_with(&self, other: &SpriteTexture) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tiling_samples_whole_image() {
        let tex = SpriteTexture::new(TextureImage::new("sheet.png"));
        assert_eq!(tex.tiling().repeat, Vec2::ONE);
        assert_eq!(tex.tiling().offset, Vec2::ZERO);
        assert_eq!(tex.tiling().wrap, WrapMode::Clamp);
    }

    #[test]
    fn clone_shares_image_but_not_tiling() {
        let a = SpriteTexture::new(TextureImage::new("sheet.png"));
        let mut b = a.clone();
        b.set_offset(Vec2::new(0.5, 0.0));
        b.set_wrap(WrapMode::Repeat);

        assert!(a.shares_image_with(&b));
        assert_eq!(a.tiling().offset, Vec2::ZERO);
        assert_eq!(a.tiling().wrap, WrapMode::Clamp);
        assert_eq!(b.tiling().offset, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn separate_loads_do_not_share() {
        let a = SpriteTexture::new(TextureImage::new("sheet.png"));
        let b = SpriteTexture::new(TextureImage::new("sheet.png"));
        assert!(!a.shares_image_with(&b));
    }
}
