use glam::Vec3;
use serde::{Deserialize, Serialize};
use spritestage_anim::{AnimationOptions, SpriteOptions};
use spritestage_camera::{ConvergenceCheck, OrbitConfig};
use spritestage_common::CoreError;
use spritestage_input::KeyBindings;
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use crate::error::GameError;

/// Full description of a game session's scene, loadable from YAML or JSON.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: ViewportConfig,
    pub ground: GroundConfig,
    /// Unit cubes placed on top of the ground.
    pub props: Vec<PropConfig>,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    /// Per-frame planar speed of a walking sprite.
    pub move_speed: f32,
    /// Key table. `None` uses [`KeyBindings::default`].
    pub bindings: Option<KeyBindings>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            ground: GroundConfig::default(),
            props: Vec::new(),
            camera: CameraConfig::default(),
            player: PlayerConfig::default(),
            move_speed: 0.1,
            bindings: None,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml(text: &str) -> Result<Self, GameError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file: `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_yaml(&text)?,
        };
        tracing::info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    /// Scalar checks the component constructors do not cover.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.camera.scope_factor.is_finite() && self.camera.scope_factor > 0.0) {
            return Err(CoreError::invalid(format!(
                "camera.scope_factor must be positive, got {}",
                self.camera.scope_factor
            )));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(CoreError::invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.ground.size.is_finite() && self.ground.size > 0.0) {
            return Err(CoreError::invalid("ground.size must be positive"));
        }
        if !self.move_speed.is_finite() {
            return Err(CoreError::invalid("move_speed must be finite"));
        }
        Ok(())
    }

    /// Replace the key table with one read from a file (`.json` or YAML).
    pub fn load_bindings(&mut self, path: &Path) -> Result<(), GameError> {
        let text = std::fs::read_to_string(path)?;
        let bindings = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => KeyBindings::from_json(&text)?,
            _ => KeyBindings::from_yaml(&text)?,
        };
        tracing::info!(path = %path.display(), keys = bindings.len(), "loaded key bindings");
        self.bindings = Some(bindings);
        Ok(())
    }

    pub fn bindings(&self) -> KeyBindings {
        self.bindings.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Square ground slab centred under the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub size: f32,
    pub depth: f32,
    /// Height of the walkable top face.
    pub top: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            depth: 6.0,
            top: -0.5,
        }
    }
}

impl GroundConfig {
    /// Distance from the centre at which sprites stand along the ground's edge.
    pub fn edge_offset(&self) -> f32 {
        self.size / 2.0 - 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropConfig {
    pub position: Vec3,
}

/// Orthographic camera and orbit settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Viewport pixels per world unit at the frustum edge.
    pub scope_factor: f32,
    /// Height of the camera and of its look-at pivot.
    pub height: f32,
    /// Orbit radius. Defaults to `scope_factor / 5`.
    pub range: Option<f32>,
    pub base_speed: f32,
    pub angle_delta: f32,
    pub convergence: ConvergenceCheck,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scope_factor: 50.0,
            height: 3.0,
            range: None,
            base_speed: PI / 30.0,
            angle_delta: FRAC_PI_2,
            convergence: ConvergenceCheck::Magnitude,
        }
    }
}

impl CameraConfig {
    pub fn range(&self) -> f32 {
        self.range.unwrap_or(self.scope_factor / 5.0)
    }

    pub fn orbit_config(&self) -> OrbitConfig {
        OrbitConfig {
            range: self.range(),
            pivot_height: self.height,
            base_speed: self.base_speed,
            angle_delta: self.angle_delta,
            convergence: self.convergence,
            ..OrbitConfig::default()
        }
    }
}

/// Sprite-sheet layout of an animated character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub image: String,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub num_tiles: u32,
    pub stop_at: Option<u32>,
    pub duration_ms: Option<f64>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            image: "assets/sprites/cauliflower.png".into(),
            tiles_x: 42,
            tiles_y: 1,
            num_tiles: 42,
            stop_at: Some(0),
            duration_ms: None,
        }
    }
}

impl SheetConfig {
    pub fn animation_options(&self) -> AnimationOptions {
        AnimationOptions {
            stop_at: self.stop_at,
            duration_ms: self.duration_ms,
            ..AnimationOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub sheet: SheetConfig,
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sheet: SheetConfig::default(),
            position: Vec3::new(0.0, 0.8, 9.5),
            scale: Vec3::splat(3.0),
        }
    }
}

impl PlayerConfig {
    pub fn sprite_options(&self) -> SpriteOptions {
        SpriteOptions {
            position: self.position,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritestage_input::{Action, KeyCode};

    #[test]
    fn defaults_describe_the_stock_scene() {
        let c = SceneConfig::default();
        assert_eq!(c.camera.range(), 10.0);
        assert_eq!(c.ground.edge_offset(), 9.5);
        assert_eq!(c.player.sheet.num_tiles, 42);
        assert_eq!(c.player.sheet.stop_at, Some(0));
        assert_eq!(c.move_speed, 0.1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_only_listed_fields() {
        let yaml = r#"
camera:
  scope_factor: 40
  range: 12
props:
  - position: [1, 0, 2]
  - position: [-3, 0, 0]
player:
  sheet:
    image: hero.png
    tiles_x: 8
    tiles_y: 2
    num_tiles: 14
    stop_at: null
bindings:
  81: orbit-left
  69: orbit-right
"#;
        let c = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(c.camera.scope_factor, 40.0);
        assert_eq!(c.camera.range(), 12.0);
        assert_eq!(c.camera.height, 3.0);
        assert_eq!(c.props.len(), 2);
        assert_eq!(c.props[0].position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(c.player.sheet.image, "hero.png");
        assert_eq!(c.player.sheet.stop_at, None);
        assert_eq!(c.player.position, Vec3::new(0.0, 0.8, 9.5));
        let bindings = c.bindings();
        assert_eq!(bindings.action_for(KeyCode(81)), Some(Action::OrbitLeft));
        assert_eq!(bindings.action_for(KeyCode::KEY_A), None);
    }

    #[test]
    fn json_config() {
        let c = SceneConfig::from_json(
            r#"{"move_speed": 0.25, "camera": {"convergence": "wrapped-difference"}}"#,
        )
        .unwrap();
        assert_eq!(c.move_speed, 0.25);
        assert_eq!(c.camera.convergence, ConvergenceCheck::WrappedDifference);
        assert_eq!(c.bindings(), KeyBindings::default());
    }

    #[test]
    fn orbit_config_uses_camera_height_as_pivot() {
        let c = CameraConfig::default();
        let orbit = c.orbit_config();
        assert_eq!(orbit.range, 10.0);
        assert_eq!(orbit.pivot_height, 3.0);
        assert_eq!(orbit.base_speed, PI / 30.0);
    }

    #[test]
    fn validate_rejects_zero_scope() {
        let mut c = SceneConfig::default();
        c.camera.scope_factor = 0.0;
        assert!(matches!(c.validate(), Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn bundled_scene_parses() {
        let c = SceneConfig::from_yaml(include_str!("../../../scenes/cubes.yaml")).unwrap();
        assert_eq!(c.props.len(), 3);
        assert_eq!(c.viewport.width, 1280.0);
        assert_eq!(c.bindings(), KeyBindings::default());
        assert_eq!(c.player, PlayerConfig::default());
    }

    #[test]
    fn load_bindings_replaces_table() {
        let path = std::env::temp_dir()
            .join(format!("spritestage-keys-{}.yaml", std::process::id()));
        std::fs::write(&path, "32: player-jump\n").unwrap();
        let mut c = SceneConfig::default();
        c.load_bindings(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.bindings().len(), 1);
        assert_eq!(c.bindings().action_for(KeyCode(32)), Some(Action::PlayerJump));
    }

    #[test]
    fn bad_bindings_file_is_a_bindings_error() {
        let path = std::env::temp_dir()
            .join(format!("spritestage-badkeys-{}.yaml", std::process::id()));
        std::fs::write(&path, "37: player-fly\n").unwrap();
        let mut c = SceneConfig::default();
        let err = c.load_bindings(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, GameError::Bindings(_)));
        assert_eq!(c.bindings, None);
    }

    #[test]
    fn load_reads_yaml_file() {
        let path = std::env::temp_dir()
            .join(format!("spritestage-scene-{}.yaml", std::process::id()));
        std::fs::write(&path, "move_speed: 0.2\n").unwrap();
        let c = SceneConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.move_speed, 0.2);
    }
}
