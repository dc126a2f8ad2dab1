//! # Mock Transport
//!
//! Utilities for testing the editor without a GraphQL server.
//!
//! Queue expectations per operation with [`MockTransport::expect`], hand the mock to a
//! [`GraphQLClient`](crate::client::GraphQLClient), then assert on
//! [`MockTransport::requests`] and call [`MockTransport::verify`].
//!
//! # Example
//! ```ignore
//! let mock = MockTransport::new();
//! mock.expect::<GetPost>().return_data(json!({"posts": []}));
//! mock.expect::<CreateNewPost>().return_data(json!({"createPost": post}));
//!
//! let client = GraphQLClient::new(mock.clone());
//! // ... drive the editor ...
//! mock.verify(); // every expectation consumed, nothing unexpected
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::error::TransportError;
use super::operations::Operation;
use super::request::GraphQLRequest;
use super::response::{GraphQLError, GraphQLResponse};
use super::transport::Transport;

enum Reply {
    Response(GraphQLResponse),
    Fail(String),
}

/// An expected request and the reply to give it.
struct Expectation {
    operation: &'static str,
    reply: Reply,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<GraphQLRequest>,
    unexpected: Vec<String>,
}

/// A scripted [`Transport`] that records every request it sees.
///
/// Requests are matched to the oldest pending expectation with the same operation
/// name, so interleaving between the query watch and mutations doesn't matter.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one request for operation `O`.
    pub fn expect<O: Operation>(&self) -> ExpectationBuilder {
        ExpectationBuilder {
            operation: O::NAME,
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<GraphQLRequest> {
        self.state.lock().requests.clone()
    }

    /// Requests received for operation `O`.
    pub fn requests_for<O: Operation>(&self) -> Vec<GraphQLRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.operation_name.as_deref() == Some(O::NAME))
            .cloned()
            .collect()
    }

    /// Number of expectations not yet consumed.
    pub fn pending(&self) -> usize {
        self.state.lock().expectations.len()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            let remaining: Vec<_> = state.expectations.iter().map(|e| e.operation).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        let mut state = self.state.lock();
        let name = request.name().to_string();
        state.requests.push(request);

        let position = state
            .expectations
            .iter()
            .position(|e| e.operation == name);
        match position.and_then(|i| state.expectations.remove(i)) {
            Some(Expectation {
                reply: Reply::Response(response),
                ..
            }) => Ok(response),
            Some(Expectation {
                reply: Reply::Fail(message),
                ..
            }) => Err(TransportError::Unavailable(message)),
            None => {
                state.unexpected.push(name.clone());
                Err(TransportError::Unexpected(name))
            }
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    operation: &'static str,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    fn push(self, reply: Reply) {
        self.state.lock().expectations.push_back(Expectation {
            operation: self.operation,
            reply,
        });
    }

    /// Answer with `{ "data": data }`.
    pub fn return_data(self, data: Value) {
        self.push(Reply::Response(GraphQLResponse::with_data(data)));
    }

    /// Answer with a GraphQL error and no data.
    pub fn return_graphql_error(self, message: impl Into<String>) {
        let error = GraphQLError::new(message);
        self.push(Reply::Response(GraphQLResponse::with_error(error)));
    }

    /// Fail at the transport level, as if the server were unreachable.
    pub fn return_transport_error(self, message: impl Into<String>) {
        self.push(Reply::Fail(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::operations::{DeletePost, DeletePostVariables, GetPost};
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_matches_by_operation_name() {
        let mock = MockTransport::new();
        mock.expect::<DeletePost>().return_graphql_error("nope");
        mock.expect::<GetPost>().return_data(json!({"posts": []}));

        // GetPost arrives first even though DeletePost was queued first.
        let list = GraphQLRequest::for_operation::<GetPost>(&()).unwrap();
        let response = mock.execute(list).await.unwrap();
        assert_eq!(response.data, Some(json!({"posts": []})));

        let vars = DeletePostVariables { id: "p1".into() };
        let delete = GraphQLRequest::for_operation::<DeletePost>(&vars).unwrap();
        let response = mock.execute(delete).await.unwrap();
        assert_eq!(response.error_message(), Some("nope".to_string()));

        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.requests_for::<DeletePost>()[0].variables, Some(json!({"id": "p1"})));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_unexpected_request_fails_verify() {
        let mock = MockTransport::new();
        let list = GraphQLRequest::for_operation::<GetPost>(&()).unwrap();
        assert!(matches!(
            mock.execute(list).await,
            Err(TransportError::Unexpected(name)) if name == "GetPost"
        ));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_unmet_expectation_fails_verify() {
        let mock = MockTransport::new();
        mock.expect::<GetPost>().return_transport_error("down");
        mock.verify();
    }
}
