use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use spritestage_common::{CoreError, CoreResult};
use spritestage_render::CameraHandle;

/// Angular distance below which an orbit counts as finished.
pub const CONVERGENCE_THRESHOLD: f32 = 1e-3;

/// Which way to orbit. `Left` decreases the angle, `Right` increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitDirection {
    Left,
    Right,
}

impl FromStr for OrbitDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(CoreError::invalid(format!(
                "orbit direction must be \"left\" or \"right\", got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for OrbitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// How the controller decides that the current angle has reached the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConvergenceCheck {
    /// Compare `|target|` with `|angle|`.
    ///
    /// Angles of equal magnitude and opposite sign count as converged, so
    /// reversing across zero can snap straight to the target.
    #[default]
    Magnitude,
    /// Compare the signed angular difference wrapped into `[-π, π)`.
    WrappedDifference,
}

impl ConvergenceCheck {
    fn converged(self, angle: f32, target: f32, threshold: f32) -> bool {
        match self {
            Self::Magnitude => (target.abs() - angle.abs()).abs() < threshold,
            Self::WrappedDifference => wrap_angle(target - angle).abs() < threshold,
        }
    }
}

/// Wrap an angle into `[-π, π)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Orbit geometry and speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radius of the orbit circle.
    pub range: f32,
    /// Height of both the camera and the look-at pivot.
    pub pivot_height: f32,
    /// Angular speed while orbiting, in radians per frame.
    pub base_speed: f32,
    /// Angle added to the target by each orbit command.
    pub angle_delta: f32,
    pub threshold: f32,
    pub convergence: ConvergenceCheck,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            range: 10.0,
            pivot_height: 3.0,
            base_speed: PI / 30.0,
            angle_delta: FRAC_PI_2,
            threshold: CONVERGENCE_THRESHOLD,
            convergence: ConvergenceCheck::Magnitude,
        }
    }
}

impl OrbitConfig {
    fn validate(&self) -> CoreResult<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CoreError::invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )))
            }
        };
        positive("range", self.range)?;
        positive("base_speed", self.base_speed)?;
        positive("angle_delta", self.angle_delta)?;
        positive("threshold", self.threshold)?;
        if !self.pivot_height.is_finite() {
            return Err(CoreError::invalid("pivot_height must be finite"));
        }
        // The angle only stops when it lands on the target, so each turn must
        // be a whole number of speed steps.
        let steps = (self.angle_delta / self.base_speed).round();
        if (steps * self.base_speed - self.angle_delta).abs() >= self.threshold {
            return Err(CoreError::invalid(format!(
                "angle_delta {} is not a whole multiple of base_speed {}",
                self.angle_delta, self.base_speed
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitState {
    Idle,
    Orbiting,
}

/// Moves a camera around a vertical axis through the pivot in quarter turns.
///
/// Each orbit command shifts the target angle by `angle_delta` and sets the
/// angular speed; every frame [`step`](Self::step) eases the current angle
/// toward the target at that speed. Commands issued mid-orbit stack up on the
/// target, so tapping twice queues a half turn.
#[derive(Debug, Clone)]
pub struct CameraOrbitController {
    config: OrbitConfig,
    angle: f32,
    target_angle: f32,
    orbit_speed: f32,
}

impl CameraOrbitController {
    pub fn new(config: OrbitConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            angle: 0.0,
            target_angle: 0.0,
            orbit_speed: 0.0,
        })
    }

    /// Queue a quarter turn in `direction`.
    pub fn orbit(&mut self, direction: OrbitDirection) {
        match direction {
            OrbitDirection::Left => {
                self.orbit_speed = -self.config.base_speed;
                self.target_angle -= self.config.angle_delta;
            }
            OrbitDirection::Right => {
                self.orbit_speed = self.config.base_speed;
                self.target_angle += self.config.angle_delta;
            }
        }
        tracing::debug!(
            %direction,
            angle = self.angle,
            target = self.target_angle,
            "orbit queued"
        );
    }

    /// Parse `direction` and orbit. A bad name is rejected before any state changes.
    pub fn orbit_by_name(&mut self, direction: &str) -> CoreResult<()> {
        let direction = direction.parse::<OrbitDirection>()?;
        self.orbit(direction);
        Ok(())
    }

    /// Advance one frame and place `camera` on the orbit circle.
    ///
    /// Runs every frame whether or not an orbit is in progress. Once the
    /// target is reached, both angles are reduced modulo 2π so repeated
    /// orbits never grow them without bound.
    pub fn step<C: CameraHandle>(&mut self, _frame_time_ms: f64, camera: &mut C) {
        if self.orbit_speed != 0.0 {
            if self
                .config
                .convergence
                .converged(self.angle, self.target_angle, self.config.threshold)
            {
                self.target_angle %= TAU;
                self.angle = self.target_angle;
                self.orbit_speed = 0.0;
                tracing::debug!(angle = self.angle, "orbit finished");
            } else {
                self.angle += self.orbit_speed;
            }
        }

        camera.set_position(self.camera_position());
        camera.look_at(self.pivot());
    }

    /// Where the camera belongs for the current angle.
    pub fn camera_position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.config.range,
            self.config.pivot_height,
            self.angle.sin() * self.config.range,
        )
    }

    pub fn pivot(&self) -> Vec3 {
        Vec3::new(0.0, self.config.pivot_height, 0.0)
    }

    pub fn state(&self) -> OrbitState {
        if self.orbit_speed == 0.0 {
            OrbitState::Idle
        } else {
            OrbitState::Orbiting
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn orbit_speed(&self) -> f32 {
        self.orbit_speed
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }
}
