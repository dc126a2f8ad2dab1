//! Error types for the editor actor.

use thiserror::Error;

/// Errors returned by [`EditorClient`](super::EditorClient).
///
/// Mutation failures are not in here: they are logged by the editor and never
/// reported to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Editor closed")]
    ActorClosed,

    #[error("Editor dropped response channel")]
    ActorDropped,

    /// Submission refused because the create form doesn't validate.
    #[error("Invalid form: {}", .0.join(", "))]
    InvalidForm(Vec<String>),
}
