//! Rendering Adapter: the narrow handles the core talks to.
//!
//! # Invariants
//! - The core never draws; it only mutates handles (positions, scales, tiling offsets).
//! - Each `SpriteTexture` owns its tiling state. Image data is shared read-only.
//!
//! # Workaround
//! Ships a debug text renderer in place of a GPU backend. The `Renderer` trait
//! is stable; swap in a real backend without changing consumers.

mod camera;
mod renderer;
mod scene;
mod texture;

pub use camera::{CameraHandle, OrthographicCamera};
pub use renderer::{DebugTextRenderer, FrameView, Renderer};
pub use scene::{Prop, PropKind, Renderable, SpriteMesh};
pub use texture::{SpriteTexture, TextureImage, Tiling, WrapMode};

pub fn crate_info() -> &'static str {
    "spritestage-render v0.1.0"
}
