//! # Transports
//!
//! A [`Transport`] takes one [`GraphQLRequest`] and returns the server's
//! [`GraphQLResponse`]. It knows nothing about watches or refetching; that lives in
//! [`GraphQLClient`](crate::client::GraphQLClient).
//!
//! Implementations in this crate:
//! - [`HttpTransport`]: JSON over HTTP POST.
//! - [`InMemoryTransport`](crate::backend::InMemoryTransport): an in-process post store.
//! - [`MockTransport`](crate::graphql::mock::MockTransport): scripted responses for tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::error::TransportError;
use super::request::GraphQLRequest;
use super::response::GraphQLResponse;

/// Executes a single GraphQL request.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError>;
}

/// GraphQL over HTTP: `POST` of `{query, variables, operationName}` as JSON.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for `endpoint`, failing requests that take longer than `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(operation = %request.name()))]
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        debug!(variables = ?request.variables, "POST {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "GraphQL endpoint returned an error status");
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GraphQLResponse>().await?)
    }
}
