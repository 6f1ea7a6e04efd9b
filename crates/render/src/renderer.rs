use std::fmt::Write;

use crate::camera::OrthographicCamera;
use crate::scene::{Prop, PropKind, SpriteMesh};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    /// Timestamp of the frame in milliseconds.
    pub time_ms: f64,
    pub camera: &'a OrthographicCamera,
    pub props: &'a [Prop],
    pub sprites: Vec<&'a SpriteMesh>,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer only reads the frame; scene state is owned by the session.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameView<'_>) -> Self::Output;
}

/// Debug text renderer, used in place of a GPU backend.
///
/// Produces a human-readable dump of the frame. Handy for CLI output,
/// logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView<'_>) -> String {
        let mut out = String::new();
        let cam = frame.camera;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== Frame (t={:.1}ms) ===", frame.time_ms);
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) frustum=[{:.1}, {:.1}, {:.1}, {:.1}]",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.left,
            cam.right,
            cam.top,
            cam.bottom
        );
        let _ = writeln!(out, "Props: {}", frame.props.len());
        for prop in frame.props {
            let p = prop.transform.position;
            let PropKind::Cube { extents } = prop.kind;
            let _ = writeln!(
                out,
                "  [{}] cube pos=({:.2}, {:.2}, {:.2}) size=({:.1}, {:.1}, {:.1})",
                prop.id.short(),
                p.x,
                p.y,
                p.z,
                extents.x,
                extents.y,
                extents.z
            );
        }
        let _ = writeln!(out, "Sprites: {}", frame.sprites.len());
        for sprite in &frame.sprites {
            let p = sprite.transform.position;
            let s = sprite.transform.scale;
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.2}, {:.2}, {:.2}) scale=({:.1}, {:.1}, {:.1}) uv=({:.4}, {:.4})",
                sprite.id.short(),
                sprite.image.source,
                p.x,
                p.y,
                p.z,
                s.x,
                s.y,
                s.z,
                sprite.tiling.offset.x,
                sprite.tiling.offset.y
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{SpriteTexture, TextureImage};
    use glam::Vec3;

    #[test]
    fn debug_renderer_empty_frame() {
        let camera = OrthographicCamera::from_viewport(800.0, 600.0, 50.0);
        let frame = FrameView {
            time_ms: 0.0,
            camera: &camera,
            props: &[],
            sprites: Vec::new(),
        };
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("t=0.0ms"));
        assert!(output.contains("Props: 0"));
        assert!(output.contains("Sprites: 0"));
    }

    #[test]
    fn debug_renderer_lists_props_and_sprites() {
        let camera = OrthographicCamera::from_viewport(800.0, 600.0, 50.0);
        let props = vec![Prop::ground(20.0, 6.0, -0.5), Prop::cube(Vec3::ZERO)];
        let mesh = SpriteMesh::new(&SpriteTexture::new(TextureImage::new("hero.png")));
        let frame = FrameView {
            time_ms: 16.0,
            camera: &camera,
            props: &props,
            sprites: vec![&mesh],
        };
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("Props: 2"));
        assert!(output.contains("Sprites: 1"));
        assert!(output.contains("hero.png"));
        assert!(output.contains("size=(20.0, 6.0, 20.0)"));
    }
}
