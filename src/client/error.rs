//! Error types for the GraphQL client.

use thiserror::Error;

use crate::graphql::{GraphQLError, TransportError};

/// Errors from executing a typed operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with one or more GraphQL errors.
    #[error("GraphQL error: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),

    /// The variables could not be serialized.
    #[error("Failed to encode {operation} variables: {source}")]
    Encode {
        operation: &'static str,
        source: serde_json::Error,
    },

    /// `data` did not match the operation's payload type.
    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },

    #[error("No data in {0} response")]
    NoData(&'static str),
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_errors_are_joined() {
        let err = ClientError::GraphQL(vec![
            GraphQLError::new("first"),
            GraphQLError::new("second").at("posts"),
        ]);
        assert_eq!(err.to_string(), "GraphQL error: first; second (at posts)");
    }
}
