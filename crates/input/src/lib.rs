//! Input: raw window events and the key table that maps them to actions.
//!
//! # Invariants
//! - The key table is data passed in at construction, never global state.
//! - Game logic consumes actions, never raw key codes.

pub mod action;
pub mod bindings;
pub mod event;

pub use action::Action;
pub use bindings::{BindingsError, KeyBindings};
pub use event::{InputEvent, KeyCode};

pub fn crate_info() -> &'static str {
    "spritestage-input v0.1.0"
}
