//! GraphQL wire types, typed operations and transports.
//!
//! - [`GraphQLRequest`] / [`GraphQLResponse`]: the JSON bodies exchanged with a server.
//! - [`operations`]: the four documents the editor uses, each with typed variables and data.
//! - [`Transport`]: one request in, one response out. See [`HttpTransport`] and
//!   [`mock::MockTransport`].

pub mod error;
pub mod mock;
pub mod operations;
pub mod request;
pub mod response;
pub mod transport;

pub use error::TransportError;
pub use operations::*;
pub use request::{GraphQLRequest, OperationKind};
pub use response::{GraphQLError, GraphQLResponse};
pub use mock::MockTransport;
pub use transport::{HttpTransport, Transport};
