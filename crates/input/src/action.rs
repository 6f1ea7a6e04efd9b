use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bindings::BindingsError;

/// A semantic action produced from a key press.
///
/// Names follow the `player-*` / `orbit-*` convention used in binding files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Walk the player toward screen-left.
    PlayerLeft,
    /// Walk the player toward screen-right.
    PlayerRight,
    PlayerJump,
    /// Bound by default but has no behaviour yet.
    PlayerDown,
    /// Orbit the camera a quarter turn left (on key release).
    OrbitLeft,
    /// Orbit the camera a quarter turn right (on key release).
    OrbitRight,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::PlayerLeft,
        Action::PlayerRight,
        Action::PlayerJump,
        Action::PlayerDown,
        Action::OrbitLeft,
        Action::OrbitRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerLeft => "player-left",
            Self::PlayerRight => "player-right",
            Self::PlayerJump => "player-jump",
            Self::PlayerDown => "player-down",
            Self::OrbitLeft => "orbit-left",
            Self::OrbitRight => "orbit-right",
        }
    }

    /// Whether this is one of the horizontal walk actions.
    pub fn is_walk(&self) -> bool {
        matches!(self, Self::PlayerLeft | Self::PlayerRight)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BindingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| BindingsError::UnknownAction(s.to_string()))
    }
}
