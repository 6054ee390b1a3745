//! Error types for element setup.
//!
//! The only validated precondition in the whole system is the presence of
//! an identity on each element; everything else defaults or is skipped
//! defensively. A failed setup aborts that one instance and leaves its
//! siblings untouched.

use thiserror::Error;

/// Errors raised while (re)initializing an element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A draggable was initialized without an identity
    #[error("required field 'data-drag-id' not found")]
    MissingDragId,

    /// A drop zone was initialized without an identity
    #[error("required field 'data-drop-id' not found")]
    MissingDropId,
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, ConfigError>;
