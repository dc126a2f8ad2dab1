//! A [`Transport`] that answers the post operations from a [`PostStore`](super::PostStore).

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::error::StoreError;
use super::store::StoreClient;
use crate::graphql::{
    CreateNewPost, CreatePostData, CreatePostVariables, DeletePost, DeletePostData,
    DeletePostVariables, GetPost, GraphQLError, GraphQLRequest, GraphQLResponse, Operation,
    PostsData, Transport, TransportError, UpdatePost, UpdatePostData, UpdatePostVariables,
};
use crate::model::{PostCreate, PostUpdate};

/// Serves `GetPost`, `CreateNewPost`, `UpdatePost` and `DeletePost` without a network.
///
/// Requests are routed by operation name. The document text is not parsed.
#[derive(Clone)]
pub struct InMemoryTransport {
    store: StoreClient,
}

impl InMemoryTransport {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    async fn dispatch(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        match request.name() {
            GetPost::NAME => {
                let posts = self.store.list().await.map_err(unavailable)?;
                respond(&PostsData { posts })
            }
            CreateNewPost::NAME => {
                let vars: CreatePostVariables = match variables(&request) {
                    Ok(vars) => vars,
                    Err(error) => return Ok(GraphQLResponse::with_error(error)),
                };
                let params = PostCreate {
                    title: vars.title,
                    text: vars.text,
                };
                match self.store.create(params).await {
                    Ok(post) => respond(&CreatePostData { create_post: post }),
                    Err(e) => store_error(e, "createPost"),
                }
            }
            UpdatePost::NAME => {
                let vars: UpdatePostVariables = match variables(&request) {
                    Ok(vars) => vars,
                    Err(error) => return Ok(GraphQLResponse::with_error(error)),
                };
                let update = PostUpdate {
                    id: vars.id,
                    title: vars.title,
                    text: vars.text,
                    is_published: Some(vars.is_published),
                };
                match self.store.update(update).await {
                    Ok(post) => respond(&UpdatePostData { update_post: post }),
                    Err(e) => store_error(e, "updatePost"),
                }
            }
            DeletePost::NAME => {
                let vars: DeletePostVariables = match variables(&request) {
                    Ok(vars) => vars,
                    Err(error) => return Ok(GraphQLResponse::with_error(error)),
                };
                match self.store.delete(vars.id).await {
                    Ok(post) => respond(&DeletePostData { delete_post: post }),
                    Err(e) => store_error(e, "deletePost"),
                }
            }
            other => {
                warn!(operation = other, "Unknown operation");
                Ok(GraphQLResponse::with_error(GraphQLError::new(format!(
                    "Unknown operation: {other}"
                ))))
            }
        }
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        debug!(operation = request.name(), kind = ?request.kind, "Executing in memory");
        self.dispatch(request).await
    }
}

fn variables<T: DeserializeOwned>(request: &GraphQLRequest) -> Result<T, GraphQLError> {
    let value = request.variables.clone().unwrap_or_default();
    serde_json::from_value(value)
        .map_err(|e| GraphQLError::new(format!("Invalid variables for {}: {e}", request.name())))
}

fn respond(data: &impl Serialize) -> Result<GraphQLResponse, TransportError> {
    Ok(GraphQLResponse::with_data(serde_json::to_value(data)?))
}

fn store_error(error: StoreError, field: &str) -> Result<GraphQLResponse, TransportError> {
    match error {
        StoreError::NotFound(_) => Ok(GraphQLResponse::with_error(
            GraphQLError::new(error.to_string()).at(field),
        )),
        other => Err(unavailable(other)),
    }
}

fn unavailable(error: StoreError) -> TransportError {
    TransportError::Unavailable(error.to_string())
}
