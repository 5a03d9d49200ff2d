//! Render error types.

use thiserror::Error;

/// Errors that can occur while emitting markup.
///
/// Building the markup itself cannot fail; only the output sink can.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output sink rejected a write.
    #[error("Failed to write markup: {0}")]
    Write(#[from] std::fmt::Error),
}
