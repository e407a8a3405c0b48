use thiserror::Error;

/// A game rejected the setup payload a match was created with.
///
/// Carries the game's own message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SetupDataError {
    pub message: String,
}

impl SetupDataError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
