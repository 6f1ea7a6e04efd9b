use glam::Vec2;
use serde::{Deserialize, Serialize};
use spritestage_common::{CoreError, CoreResult};
use spritestage_render::{SpriteTexture, Tiling, WrapMode};

/// Baseline playback rate. A full loop of `n` tiles lasts `n / BASE_FPS` seconds.
pub const BASE_FPS: f64 = 12.0;

/// Optional construction parameters for [`AnimatedTexture`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Tile index at which playback pauses itself. `None` loops forever.
    pub stop_at: Option<u32>,
    /// Whether the animation starts paused.
    pub paused: bool,
    /// Tile shown before the first advance.
    pub start_tile: u32,
    /// Overrides the loop duration derived from [`BASE_FPS`].
    pub duration_ms: Option<f64>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            stop_at: None,
            paused: true,
            start_tile: 0,
            duration_ms: None,
        }
    }
}

/// Cyclic playback over the tiles of a sprite sheet.
///
/// Tiles are numbered row-major from the top-left. The sheet may end in blank
/// tiles, so only the first `num_tiles` of the `tiles_x * tiles_y` grid are used.
/// Frames advance at most once per `duration_ms / num_tiles`, measured on the
/// frame timestamps passed to [`update`](Self::update), so the visual rate does
/// not depend on how often the render loop runs.
#[derive(Debug, Clone)]
pub struct AnimatedTexture {
    texture: SpriteTexture,
    tiles_x: u32,
    tiles_y: u32,
    num_tiles: u32,
    duration_ms: f64,
    current_tile: u32,
    last_update_ms: f64,
    paused: bool,
    stop_at: Option<u32>,
}

impl AnimatedTexture {
    /// Build an animation over `texture`.
    ///
    /// The texture handle is cloned: the animation scrolls its own copy and
    /// never touches the caller's tiling state.
    pub fn new(
        texture: &SpriteTexture,
        tiles_x: u32,
        tiles_y: u32,
        num_tiles: u32,
        options: AnimationOptions,
    ) -> CoreResult<Self> {
        if tiles_x == 0 || tiles_y == 0 {
            return Err(CoreError::invalid(format!(
                "sprite sheet grid must be at least 1x1, got {tiles_x}x{tiles_y}"
            )));
        }
        if num_tiles == 0 {
            return Err(CoreError::invalid("num_tiles must be positive"));
        }
        if u64::from(num_tiles) > u64::from(tiles_x) * u64::from(tiles_y) {
            return Err(CoreError::invalid(format!(
                "num_tiles {num_tiles} exceeds {tiles_x}x{tiles_y} grid"
            )));
        }
        if let Some(stop_at) = options.stop_at {
            if stop_at >= num_tiles {
                return Err(CoreError::invalid(format!(
                    "stop_at {stop_at} is outside 0..{num_tiles}"
                )));
            }
        }
        if options.start_tile >= num_tiles {
            return Err(CoreError::invalid(format!(
                "start_tile {} is outside 0..{num_tiles}",
                options.start_tile
            )));
        }
        let duration_ms = options
            .duration_ms
            .unwrap_or(f64::from(num_tiles) / BASE_FPS * 1000.0);
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(CoreError::invalid(format!(
                "duration_ms must be positive and finite, got {duration_ms}"
            )));
        }

        let mut texture = texture.clone();
        texture.set_wrap(WrapMode::Repeat);
        texture.set_repeat(Vec2::new(1.0 / tiles_x as f32, 1.0 / tiles_y as f32));

        let mut animation = Self {
            texture,
            tiles_x,
            tiles_y,
            num_tiles,
            duration_ms,
            current_tile: options.start_tile,
            last_update_ms: 0.0,
            paused: options.paused,
            stop_at: options.stop_at,
        };
        animation.apply_offset();
        Ok(animation)
    }

    /// Advance one tile if playing and a full frame interval has elapsed.
    ///
    /// Returns whether the tile changed. The wrap to tile 0 happens before the
    /// `stop_at` check, so `stop_at = Some(0)` pauses only after a full loop.
    pub fn update(&mut self, frame_time_ms: f64) -> bool {
        if self.paused || frame_time_ms - self.last_update_ms < self.frame_interval_ms() {
            return false;
        }

        self.last_update_ms = frame_time_ms;
        self.current_tile += 1;
        if self.current_tile == self.num_tiles {
            self.current_tile = 0;
        }
        if Some(self.current_tile) == self.stop_at {
            self.paused = true;
            tracing::debug!(tile = self.current_tile, "animation reached stop tile");
        }
        self.apply_offset();
        tracing::trace!(tile = self.current_tile, t = frame_time_ms, "animation advanced");
        true
    }

    pub fn start(&mut self) {
        if self.paused {
            tracing::debug!(tile = self.current_tile, "animation started");
        }
        self.paused = false;
    }

    pub fn stop(&mut self) {
        if !self.paused {
            tracing::debug!(tile = self.current_tile, "animation stopped");
        }
        self.paused = true;
    }

    /// Minimum time between two tile advances.
    pub fn frame_interval_ms(&self) -> f64 {
        self.duration_ms / f64::from(self.num_tiles)
    }

    /// Sheet-sampling offset of `tile`: column fraction on x, row fraction on y.
    pub fn offset_for(&self, tile: u32) -> Vec2 {
        Vec2::new(
            (tile % self.tiles_x) as f32 / self.tiles_x as f32,
            (tile / self.tiles_x) as f32 / self.tiles_y as f32,
        )
    }

    pub fn current_tile(&self) -> u32 {
        self.current_tile
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stop_at(&self) -> Option<u32> {
        self.stop_at
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    pub fn num_tiles(&self) -> u32 {
        self.num_tiles
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn last_update_ms(&self) -> f64 {
        self.last_update_ms
    }

    /// This animation's private texture handle.
    pub fn texture(&self) -> &SpriteTexture {
        &self.texture
    }

    pub fn tiling(&self) -> Tiling {
        self.texture.tiling()
    }

    fn apply_offset(&mut self) {
        let offset = self.offset_for(self.current_tile);
        self.texture.set_offset(offset);
    }
}
