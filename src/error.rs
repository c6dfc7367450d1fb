//! Error types for path selection and tree reshaping

use thiserror::Error;

/// Errors surfaced by anvil operations
///
/// "Not found" is never an error anywhere in this crate: a missing path
/// segment, a missing property, or a node-kind mismatch produce `Ok(None)`.
/// Only structural misuse (traversing through an array) and absent required
/// arguments are hard errors.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A required argument was absent or empty.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    /// A path attempted to navigate through an array node.
    #[error("cannot navigate through arrays: invalid segment '{segment}' in path '{path}'")]
    ArrayTraversal {
        /// The segment that landed on an array
        segment: String,
        /// The full path being resolved
        path: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReshapeError>;
