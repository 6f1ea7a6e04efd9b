use glam::Vec3;
use serde::{Deserialize, Serialize};
use spritestage_common::{NodeId, Transform};
use std::sync::Arc;

use crate::texture::{SpriteTexture, TextureImage, Tiling};

/// Mutations a billboard's render handle must accept.
///
/// An animated sprite pushes its position, scale and current sheet window
/// through this trait after every update.
pub trait Renderable {
    fn set_position(&mut self, position: Vec3);
    fn set_scale(&mut self, scale: Vec3);
    fn set_tiling(&mut self, tiling: Tiling);
}

/// Transparent camera-facing quad drawing a window of a sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteMesh {
    pub id: NodeId,
    pub transform: Transform,
    pub tiling: Tiling,
    pub image: Arc<TextureImage>,
    pub transparent: bool,
}

impl SpriteMesh {
    pub fn new(texture: &SpriteTexture) -> Self {
        Self {
            id: NodeId::new(),
            transform: Transform::default(),
            tiling: texture.tiling(),
            image: Arc::clone(texture.image()),
            transparent: true,
        }
    }
}

impl Renderable for SpriteMesh {
    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    fn set_tiling(&mut self, tiling: Tiling) {
        self.tiling = tiling;
    }
}

/// Static scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropKind {
    /// Axis-aligned box with the given full extents, centred on the transform.
    Cube { extents: Vec3 },
}

/// A non-animated scene item (ground slab, cube).
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub id: NodeId,
    pub kind: PropKind,
    pub transform: Transform,
}

impl Prop {
    /// Unit cube centred at `position`.
    pub fn cube(position: Vec3) -> Self {
        Self {
            id: NodeId::new(),
            kind: PropKind::Cube {
                extents: Vec3::ONE,
            },
            transform: Transform {
                position,
                ..Transform::default()
            },
        }
    }

    /// Square ground slab of `size` × `depth` × `size` whose top face sits at `top`.
    pub fn ground(size: f32, depth: f32, top: f32) -> Self {
        Self {
            id: NodeId::new(),
            kind: PropKind::Cube {
                extents: Vec3::new(size, depth, size),
            },
            transform: Transform {
                position: Vec3::new(0.0, top - depth / 2.0, 0.0),
                ..Transform::default()
            },
        }
    }

    /// Height of the top face.
    pub fn top(&self) -> f32 {
        match self.kind {
            PropKind::Cube { extents } => self.transform.position.y + extents.y / 2.0,
        }
    }
}
