use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use spritestage_render::{Renderable, SpriteMesh};

use crate::texture::AnimatedTexture;

/// Initial placement of an [`AnimatedSprite`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteOptions {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A billboard character driven by a sprite-sheet animation.
///
/// Movement is a plain Euler step: `motion` is added to `position` once per
/// update, not scaled by elapsed time. The horizontal plane is x/z; y is the
/// vertical axis and is never touched by the move intents.
#[derive(Debug, Clone)]
pub struct AnimatedSprite<M = SpriteMesh> {
    animated_texture: AnimatedTexture,
    mesh: M,
    position: Vec3,
    scale: Vec3,
    motion: Vec3,
}

impl AnimatedSprite<SpriteMesh> {
    /// Sprite with a transparent billboard mesh sampling the animation's texture.
    pub fn new(animated_texture: AnimatedTexture, options: SpriteOptions) -> Self {
        let mesh = SpriteMesh::new(animated_texture.texture());
        Self::with_mesh(animated_texture, mesh, options)
    }
}

impl<M: Renderable> AnimatedSprite<M> {
    pub fn with_mesh(animated_texture: AnimatedTexture, mesh: M, options: SpriteOptions) -> Self {
        let mut sprite = Self {
            animated_texture,
            mesh,
            position: options.position,
            scale: options.scale,
            motion: Vec3::ZERO,
        };
        sprite.sync_mesh();
        sprite
    }

    /// Apply one motion step, mirror the transform onto the mesh, then advance
    /// the animation.
    pub fn update(&mut self, frame_time_ms: f64) {
        self.position += self.motion;
        self.mesh.set_scale(self.scale);
        self.mesh.set_position(self.position);
        if self.animated_texture.update(frame_time_ms) {
            self.mesh.set_tiling(self.animated_texture.tiling());
        }
    }

    /// Start walking: play the animation and set planar motion.
    ///
    /// `direction.x` drives world x, `direction.y` drives world z. Vertical
    /// motion is left as is.
    pub fn start_move(&mut self, direction: Vec2) {
        self.animated_texture.start();
        self.motion.x = direction.x;
        self.motion.z = direction.y;
        tracing::debug!(dx = direction.x, dz = direction.y, "sprite started moving");
    }

    /// Stop walking: pause the animation and clear planar motion.
    pub fn stop_move(&mut self) {
        self.animated_texture.stop();
        self.motion.x = 0.0;
        self.motion.z = 0.0;
        tracing::debug!("sprite stopped moving");
    }

    /// Reserved for a vertical impulse. Currently changes nothing.
    pub fn jump(&mut self) {
        tracing::trace!("jump requested, no vertical impulse implemented");
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn motion(&self) -> Vec3 {
        self.motion
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn animated_texture(&self) -> &AnimatedTexture {
        &self.animated_texture
    }

    fn sync_mesh(&mut self) {
        self.mesh.set_scale(self.scale);
        self.mesh.set_position(self.position);
        self.mesh.set_tiling(self.animated_texture.tiling());
    }
}
