use serde::{Deserialize, Serialize};

/// Numeric key code as reported by the windowing layer (DOM `keyCode` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ARROW_LEFT: KeyCode = KeyCode(37);
    pub const ARROW_UP: KeyCode = KeyCode(38);
    pub const ARROW_RIGHT: KeyCode = KeyCode(39);
    pub const ARROW_DOWN: KeyCode = KeyCode(40);
    pub const KEY_A: KeyCode = KeyCode(65);
    pub const KEY_S: KeyCode = KeyCode(83);
}

/// Discrete events delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    Resize { width: u32, height: u32 },
    VisibilityChange { visible: bool },
}
