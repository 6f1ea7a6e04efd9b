use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::action::Action;
use crate::event::KeyCode;

/// Errors from loading or editing key bindings.
#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key code to action table.
///
/// Serialized as a flat map, e.g. in YAML:
///
/// ```yaml
/// 37: player-left
/// 65: orbit-left
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<u32, Action>,
}

impl Default for KeyBindings {
    /// Arrow keys walk, jump and crouch; A and S orbit the camera.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::ARROW_LEFT, Action::PlayerLeft);
        bindings.bind(KeyCode::ARROW_UP, Action::PlayerJump);
        bindings.bind(KeyCode::ARROW_RIGHT, Action::PlayerRight);
        bindings.bind(KeyCode::ARROW_DOWN, Action::PlayerDown);
        bindings.bind(KeyCode::KEY_A, Action::OrbitLeft);
        bindings.bind(KeyCode::KEY_S, Action::OrbitRight);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, BindingsError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, BindingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String, BindingsError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Bind `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: KeyCode, action: Action) -> Option<Action> {
        self.keys.insert(key.0, action)
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<Action> {
        self.keys.remove(&key.0)
    }

    /// Action for a key, or `None` when the key is unbound.
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        let action = self.keys.get(&key.0).copied();
        if action.is_none() {
            tracing::trace!(key = key.0, "unbound key");
        }
        action
    }

    /// All keys bound to `action`, in ascending key-code order.
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        self.keys
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| KeyCode(*k))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, Action)> + '_ {
        self.keys.iter().map(|(k, a)| (KeyCode(*k), *a))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
