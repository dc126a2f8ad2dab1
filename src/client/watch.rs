//! # Query Watches
//!
//! A [`QueryWatch`] is a live subscription to one query. A background task fetches the
//! query once on creation and again every time the owning [`GraphQLClient`] is asked to
//! refetch that operation, pushing a [`QueryResult`] per fetch.
//!
//! The watch owns its task. Dropping the watch aborts the task and removes it from the
//! client's refetch registry, so a watch can't outlive the component that opened it.
//!
//! [`GraphQLClient`]: super::GraphQLClient

use std::sync::Arc;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::debug;

use super::error::ClientError;
use super::ClientInner;

/// One emission of a watched query: `{ data, loading, error }`.
#[derive(Debug)]
pub struct QueryResult<T> {
    /// `None` while loading or when the fetch failed.
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<Arc<ClientError>>,
}

impl<T> QueryResult<T> {
    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: ClientError) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(Arc::new(error)),
        }
    }
}

/// A live, cancelable subscription to a query's results.
pub struct QueryWatch<T> {
    pub(super) id: u64,
    pub(super) operation: &'static str,
    pub(super) receiver: mpsc::Receiver<QueryResult<T>>,
    pub(super) refetch: Arc<Notify>,
    pub(super) task: JoinHandle<()>,
    pub(super) client: Arc<ClientInner>,
}

impl<T> QueryWatch<T> {
    /// Waits for the next result. Returns `None` once the fetch task is gone.
    pub async fn next(&mut self) -> Option<QueryResult<T>> {
        self.receiver.recv().await
    }

    /// Re-executes the query; the result arrives through [`next`](Self::next).
    pub fn refetch(&self) {
        self.refetch.notify_one();
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl<T> Drop for QueryWatch<T> {
    fn drop(&mut self) {
        self.task.abort();
        self.client.watches.lock().remove(&self.id);
        debug!(operation = self.operation, watch_id = self.id, "Watch released");
    }
}
