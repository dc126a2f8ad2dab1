//! In-memory backend: a post store actor and the transport that serves GraphQL from it.

pub mod error;
pub mod store;
pub mod transport;

pub use error::StoreError;
pub use store::{PostStore, StoreClient, StoreRequest};
pub use transport::InMemoryTransport;
