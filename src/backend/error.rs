//! Error types for the in-memory post store.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Store closed")]
    ActorClosed,

    #[error("Store dropped response channel")]
    ActorDropped,
}
