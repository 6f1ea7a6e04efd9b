use spritestage_common::CoreError;
use spritestage_input::BindingsError;

/// Errors from building or driving a game session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("bindings: {0}")]
    Bindings(#[from] BindingsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no sprite at index {0}")]
    NoSuchSprite(usize),
}
