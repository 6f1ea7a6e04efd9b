//! Sprite animation: time-gated sprite-sheet playback and animated billboards.
//!
//! # Invariants
//! - `current_tile` is always a valid index into the usable frames of the sheet.
//! - The sampling offset always matches `current_tile`.
//! - Each animated texture owns a private tiling state, even when image data is shared.
//! - A sprite's render handle mirrors its position and scale after every update.

pub mod sprite;
pub mod texture;

pub use sprite::{AnimatedSprite, SpriteOptions};
pub use texture::{AnimatedTexture, AnimationOptions, BASE_FPS};
