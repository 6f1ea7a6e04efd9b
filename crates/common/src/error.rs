/// Errors raised by the core animation and camera components.
///
/// The core is a set of total functions over well-formed input, so the only
/// failure is a rejected argument. Callers get the error before any state
/// has been mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
