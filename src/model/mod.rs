//! Plain data types shared by the editor, the GraphQL layer and the in-memory backend.

pub mod post;

pub use post::*;
