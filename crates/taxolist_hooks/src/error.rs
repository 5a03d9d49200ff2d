//! Extension error types.

use thiserror::Error;

/// Errors an extension callback can report.
///
/// None of these abort a render; the registry logs them and keeps the
/// value it had before the failing callback ran.
#[derive(Debug, Error)]
pub enum HookError {
    /// The callback itself failed.
    #[error("Callback failed: {0}")]
    Callback(String),

    /// The callback panicked.
    #[error("Callback panicked: {0}")]
    Panicked(String),

    /// A filter returned a value that cannot stand in for the input.
    #[error("Unexpected value from '{point}': expected {expected}")]
    UnexpectedValue {
        point: String,
        expected: &'static str,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HookError {
    /// Creates a callback error.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    /// Creates an unexpected value error.
    pub fn unexpected(point: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedValue {
            point: point.into(),
            expected,
        }
    }
}
