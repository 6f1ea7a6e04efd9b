//! Camera orbit: quarter-turn orbit commands eased over several frames.
//!
//! # Invariants
//! - When idle, `angle == target_angle` modulo 2π.
//! - The camera always sits on the circle of radius `range` at the pivot height,
//!   aimed at the pivot.
//! - A rejected orbit command leaves the controller untouched.

mod orbit;

pub use orbit::{
    CameraOrbitController, ConvergenceCheck, OrbitConfig, OrbitDirection, OrbitState,
    CONVERGENCE_THRESHOLD,
};
