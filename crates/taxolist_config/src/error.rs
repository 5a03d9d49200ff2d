//! Configuration error types.

use thiserror::Error;

/// Errors raised while reading a settings document.
///
/// Resolution itself never fails; these only occur at the document boundary,
/// before there is a mapping to resolve.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but is not an object.
    #[error("Settings must be an object, found {0}")]
    NotAnObject(&'static str),
}
