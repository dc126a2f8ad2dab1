//! The post editor: query runner, create form, mutation dispatcher and pending-edit
//! tracker, driven by a single actor loop.
//!
//! - [`PostEditor`]: the actor. Spawn [`PostEditor::run`] on a Tokio runtime.
//! - [`EditorClient`]: the handle a view uses to send commands and read [`EditorView`]s.
//! - [`EditorState`], [`PostForm`], [`PendingEdits`]: the synchronous state underneath.

pub mod actor;
pub mod client;
pub mod error;
pub mod form;
pub mod message;
pub mod pending;
pub mod state;

pub use actor::PostEditor;
pub use client::EditorClient;
pub use error::EditorError;
pub use form::{FormControl, FormField, FormValues, PostForm, ValidationError, Validator};
pub use message::{EditorCommand, MutationOutcome};
pub use pending::PendingEdits;
pub use state::{EditorState, EditorView};
