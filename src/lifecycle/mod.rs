//! Runtime orchestration: starting, wiring and stopping the actors, plus tracing setup.
//!
//! - [`EditorSystem`] - spawns the editor and its backend and shuts them down
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod editor_system;
pub mod tracing;

pub use editor_system::*;
pub use tracing::*;
