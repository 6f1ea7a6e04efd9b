//! Game session: wires the animated player, the orbit camera and the key table
//! into one per-frame driver.
//!
//! # Invariants
//! - Each frame runs the orbit step before any sprite update.
//! - Scene layout comes from `SceneConfig` data, never from globals.
//! - Input reaches the core only through `KeyBindings` actions.

pub mod config;
pub mod error;
pub mod game;
pub mod store;

pub use config::{
    CameraConfig, GroundConfig, PlayerConfig, PropConfig, SceneConfig, SheetConfig,
    ViewportConfig,
};
pub use error::GameError;
pub use game::Game;
pub use store::Store;
