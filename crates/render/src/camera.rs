use glam::{Mat4, Vec3};

/// Camera operations the orbit controller needs.
pub trait CameraHandle {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Aim the camera at a world-space point.
    fn look_at(&mut self, target: Vec3);
}

/// Orthographic camera whose frustum scales with the viewport.
///
/// The half-extents are `width / scope_factor` and `height / scope_factor`,
/// so a larger scope factor zooms in. Near and far planes sit at
/// `-scope_factor` and `+scope_factor`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl OrthographicCamera {
    pub fn from_viewport(width: f32, height: f32, scope_factor: f32) -> Self {
        let mut camera = Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: -scope_factor,
            far: scope_factor,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
        };
        camera.resize(width, height, scope_factor);
        camera
    }

    /// Recompute the frustum for a new viewport. Near/far are left untouched.
    pub fn resize(&mut self, width: f32, height: f32, scope_factor: f32) {
        self.left = width / -scope_factor;
        self.right = width / scope_factor;
        self.top = height / scope_factor;
        self.bottom = height / -scope_factor;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraHandle for OrthographicCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}
