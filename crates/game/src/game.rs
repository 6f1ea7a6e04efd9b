use glam::Vec2;
use spritestage_anim::{AnimatedSprite, AnimatedTexture};
use spritestage_camera::{CameraOrbitController, OrbitDirection};
use spritestage_input::{Action, InputEvent, KeyBindings, KeyCode};
use spritestage_render::{
    CameraHandle, FrameView, OrthographicCamera, Prop, SpriteTexture, TextureImage,
};

use crate::config::{PlayerConfig, SceneConfig, ViewportConfig};
use crate::error::GameError;

/// One running game session.
///
/// Owns the scene (ground, props, sprites), the orthographic camera and its
/// orbit controller. The host calls [`handle_event`](Self::handle_event) for
/// window input and [`frame`](Self::frame) once per rendered frame, then hands
/// [`view`](Self::view) to a renderer.
pub struct Game {
    config: SceneConfig,
    bindings: KeyBindings,
    camera: OrthographicCamera,
    orbit: CameraOrbitController,
    props: Vec<Prop>,
    sprites: Vec<AnimatedSprite>,
    player: usize,
    viewport: ViewportConfig,
    last_frame_ms: f64,
}

impl Game {
    pub fn new(config: SceneConfig) -> Result<Self, GameError> {
        config.validate()?;
        let orbit = CameraOrbitController::new(config.camera.orbit_config())?;

        let viewport = config.viewport;
        let mut camera = OrthographicCamera::from_viewport(
            viewport.width,
            viewport.height,
            config.camera.scope_factor,
        );
        camera.position.y = config.camera.height;

        let ground = config.ground;
        let mut props = vec![Prop::ground(ground.size, ground.depth, ground.top)];
        props.extend(config.props.iter().map(|p| Prop::cube(p.position)));

        let player = Self::build_sprite(&config.player)?;

        let mut game = Self {
            bindings: config.bindings(),
            config,
            camera,
            orbit,
            props,
            sprites: vec![player],
            player: 0,
            viewport,
            last_frame_ms: 0.0,
        };
        game.orbit.step(0.0, &mut game.camera);

        tracing::info!(
            props = game.props.len(),
            bindings = game.bindings.len(),
            "game session created"
        );
        Ok(game)
    }

    /// Build an animated sprite from its config. The sprite sheet starts paused.
    pub fn build_sprite(player: &PlayerConfig) -> Result<AnimatedSprite, GameError> {
        let sheet = &player.sheet;
        let texture = SpriteTexture::new(TextureImage::new(sheet.image.clone()));
        let animation = AnimatedTexture::new(
            &texture,
            sheet.tiles_x,
            sheet.tiles_y,
            sheet.num_tiles,
            sheet.animation_options(),
        )?;
        Ok(AnimatedSprite::new(animation, player.sprite_options()))
    }

    /// Add another sprite to the frame loop. Returns its index.
    pub fn add_sprite(&mut self, sprite: AnimatedSprite) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::KeyUp { key } => self.key_up(key),
            InputEvent::Resize { width, height } => self.resize(width as f32, height as f32),
            InputEvent::VisibilityChange { .. } => {
                self.resize(self.viewport.width, self.viewport.height)
            }
        }
    }

    /// Walk keys start moving the player; jump triggers a jump.
    pub fn key_down(&mut self, key: KeyCode) {
        let Some(action) = self.bindings.action_for(key) else {
            return;
        };
        if action.is_walk() {
            let direction = self.walk_direction(action);
            self.sprites[self.player].start_move(direction);
        } else if action == Action::PlayerJump {
            self.sprites[self.player].jump();
        }
    }

    /// Orbit keys fire on release; releasing a walk key stops the player.
    pub fn key_up(&mut self, key: KeyCode) {
        let Some(action) = self.bindings.action_for(key) else {
            return;
        };
        match action {
            Action::OrbitLeft => self.orbit(OrbitDirection::Left),
            Action::OrbitRight => self.orbit(OrbitDirection::Right),
            a if a.is_walk() => self.sprites[self.player].stop_move(),
            _ => {}
        }
    }

    pub fn orbit(&mut self, direction: OrbitDirection) {
        self.orbit.orbit(direction);
    }

    /// Refit the camera frustum to a new viewport size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = ViewportConfig { width, height };
        self.camera
            .resize(width, height, self.config.camera.scope_factor);
        tracing::info!(width, height, "viewport resized");
    }

    /// Advance one rendered frame: orbit the camera, then update every sprite.
    pub fn frame(&mut self, time_ms: f64) {
        self.orbit.step(time_ms, &mut self.camera);
        for sprite in &mut self.sprites {
            sprite.update(time_ms);
        }
        self.last_frame_ms = time_ms;
    }

    /// Everything a renderer needs for the latest frame.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            time_ms: self.last_frame_ms,
            camera: &self.camera,
            props: &self.props,
            sprites: self.sprites.iter().map(|s| s.mesh()).collect(),
        }
    }

    /// Move a sprite to the ground edge on the camera's side.
    ///
    /// Uses whichever planar axis the camera is furthest along.
    pub fn place_sprite(&mut self, index: usize) -> Result<(), GameError> {
        let eye = self.camera.position();
        let edge = self.config.ground.edge_offset();
        let sprite = self
            .sprites
            .get_mut(index)
            .ok_or(GameError::NoSuchSprite(index))?;
        let mut position = sprite.position();
        if eye.x.abs() >= eye.z.abs() {
            position.x = eye.x.signum() * edge;
        } else {
            position.z = eye.z.signum() * edge;
        }
        sprite.set_position(position);
        Ok(())
    }

    /// Planar walk step for a walk action.
    ///
    /// Walks along whichever of x/z holds the smaller camera coordinate (x on
    /// ties). `PlayerRight` walks toward the negative end of that axis.
    fn walk_direction(&self, action: Action) -> Vec2 {
        let sign = if action == Action::PlayerRight { -1.0 } else { 1.0 };
        let delta = sign * self.config.move_speed;
        let eye = self.camera.position();
        if eye.x <= eye.z {
            Vec2::new(delta, 0.0)
        } else {
            Vec2::new(0.0, delta)
        }
    }

    pub fn player(&self) -> &AnimatedSprite {
        &self.sprites[self.player]
    }

    pub fn sprites(&self) -> &[AnimatedSprite] {
        &self.sprites
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn orbit_controller(&self) -> &CameraOrbitController {
        &self.orbit
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropConfig;
    use glam::Vec3;
    use spritestage_camera::OrbitState;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn game() -> Game {
        Game::new(SceneConfig::default()).unwrap()
    }

    /// Run frames 16ms apart, starting after `start`, until the orbit is idle.
    fn settle_orbit(game: &mut Game, start: f64) -> f64 {
        let mut t = start;
        for _ in 0..200 {
            t += 16.0;
            game.frame(t);
            if game.orbit_controller().state() == OrbitState::Idle {
                return t;
            }
        }
        panic!("orbit never settled");
    }

    #[test]
    fn new_session_builds_scene() {
        let g = game();
        assert_eq!(g.props().len(), 1);
        assert_eq!(g.sprites().len(), 1);
        assert!(g.camera().position.abs_diff_eq(Vec3::new(10.0, 3.0, 0.0), EPS));
        assert_eq!(g.camera().target, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(g.camera().right, 16.0);
        assert_eq!(g.player().position(), Vec3::new(0.0, 0.8, 9.5));
        assert!(g.player().animated_texture().is_paused());
    }

    #[test]
    fn config_props_become_cubes() {
        let config = SceneConfig {
            props: vec![
                PropConfig {
                    position: Vec3::new(1.0, 0.0, 1.0),
                },
                PropConfig {
                    position: Vec3::new(-2.0, 0.0, 3.0),
                },
            ],
            ..SceneConfig::default()
        };
        let g = Game::new(config).unwrap();
        assert_eq!(g.props().len(), 3);
        assert_eq!(g.view().props.len(), 3);
    }

    #[test]
    fn bad_sheet_is_rejected() {
        let mut config = SceneConfig::default();
        config.player.sheet.stop_at = Some(99);
        assert!(matches!(Game::new(config), Err(GameError::Core(_))));
    }

    #[test]
    fn walk_left_moves_along_z_when_camera_on_x() {
        let mut g = game();
        g.key_down(KeyCode::ARROW_LEFT);
        assert!(!g.player().animated_texture().is_paused());
        assert!(g.player().motion().abs_diff_eq(Vec3::new(0.0, 0.0, 0.1), EPS));

        g.frame(100.0);
        g.frame(200.0);
        g.frame(300.0);
        let z = g.player().position().z;
        assert!((z - 9.8).abs() < EPS, "z = {z}");
    }

    #[test]
    fn walk_right_negates() {
        let mut g = game();
        g.key_down(KeyCode::ARROW_RIGHT);
        assert!(g.player().motion().abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), EPS));
    }

    #[test]
    fn releasing_walk_key_stops() {
        let mut g = game();
        g.key_down(KeyCode::ARROW_LEFT);
        g.key_up(KeyCode::ARROW_LEFT);
        assert_eq!(g.player().motion(), Vec3::ZERO);
        assert!(g.player().animated_texture().is_paused());
    }

    #[test]
    fn orbit_fires_on_key_release_only() {
        let mut g = game();
        g.key_down(KeyCode::KEY_A);
        assert_eq!(g.orbit_controller().state(), OrbitState::Idle);

        g.key_up(KeyCode::KEY_A);
        assert_eq!(g.orbit_controller().state(), OrbitState::Orbiting);
        assert!((g.orbit_controller().target_angle() + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn walk_axis_follows_camera_after_orbit() {
        let mut g = game();
        g.key_up(KeyCode::KEY_S);
        settle_orbit(&mut g, 0.0);
        assert!(g.camera().position.abs_diff_eq(Vec3::new(0.0, 3.0, 10.0), EPS));

        g.key_down(KeyCode::ARROW_LEFT);
        assert!(g.player().motion().abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), EPS));
    }

    #[test]
    fn unbound_and_inert_keys_do_nothing() {
        let mut g = game();
        g.key_down(KeyCode(13));
        g.key_up(KeyCode(13));
        g.key_down(KeyCode::ARROW_DOWN);
        g.key_down(KeyCode::ARROW_UP);
        assert_eq!(g.player().motion(), Vec3::ZERO);
        assert!(g.player().animated_texture().is_paused());
        assert_eq!(g.orbit_controller().state(), OrbitState::Idle);
    }

    #[test]
    fn custom_bindings_replace_defaults() {
        let mut config = SceneConfig::default();
        config.bindings = Some(KeyBindings::from_yaml("81: orbit-right\n").unwrap());
        let mut g = Game::new(config).unwrap();

        g.key_up(KeyCode::KEY_A);
        assert_eq!(g.orbit_controller().state(), OrbitState::Idle);
        g.key_up(KeyCode(81));
        assert!((g.orbit_controller().target_angle() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn resize_and_visibility_refit_frustum() {
        let mut g = game();
        g.handle_event(InputEvent::Resize {
            width: 1000,
            height: 500,
        });
        assert_eq!(g.camera().right, 20.0);
        assert_eq!(g.camera().bottom, -10.0);
        assert_eq!(g.viewport().width, 1000.0);

        g.handle_event(InputEvent::VisibilityChange { visible: true });
        assert_eq!(g.camera().right, 20.0);
        assert_eq!(g.camera().near, -50.0);
    }

    #[test]
    fn events_route_to_key_handlers() {
        let mut g = game();
        g.handle_event(InputEvent::KeyDown {
            key: KeyCode::ARROW_LEFT,
        });
        assert!(!g.player().animated_texture().is_paused());
        g.handle_event(InputEvent::KeyUp {
            key: KeyCode::ARROW_LEFT,
        });
        assert!(g.player().animated_texture().is_paused());
    }

    #[test]
    fn frame_plays_walk_cycle() {
        let mut g = game();
        g.key_down(KeyCode::ARROW_LEFT);
        let step = g.player().animated_texture().frame_interval_ms() + 1e-3;
        for k in 1..=3 {
            g.frame(k as f64 * step);
        }
        assert_eq!(g.player().animated_texture().current_tile(), 3);
        let view = g.view();
        assert_eq!(view.sprites.len(), 1);
        assert_eq!(view.sprites[0].tiling.offset.x, 3.0 / 42.0);
    }

    #[test]
    fn place_sprite_snaps_to_camera_side() {
        let mut g = game();
        g.place_sprite(0).unwrap();
        assert_eq!(g.player().position(), Vec3::new(9.5, 0.8, 9.5));

        g.orbit(OrbitDirection::Right);
        g.orbit(OrbitDirection::Right);
        settle_orbit(&mut g, 0.0);
        // Camera now sits on -x.
        g.place_sprite(0).unwrap();
        assert_eq!(g.player().position().x, -9.5);

        assert!(matches!(g.place_sprite(3), Err(GameError::NoSuchSprite(3))));
    }

    #[test]
    fn added_sprites_update_each_frame() {
        let mut g = game();
        let mut extra = Game::build_sprite(&PlayerConfig::default()).unwrap();
        extra.start_move(Vec2::new(0.5, 0.0));
        let index = g.add_sprite(extra);
        assert_eq!(index, 1);

        g.frame(16.0);
        assert!((g.sprites()[1].position().x - 0.5).abs() < EPS);
        assert_eq!(g.view().sprites.len(), 2);
    }
}
