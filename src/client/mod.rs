//! # GraphQL Client
//!
//! The collaborator the editor talks to. It offers exactly two things on top of a
//! [`Transport`]:
//!
//! - [`GraphQLClient::watch_query`]: a live [`QueryWatch`] that re-emits whenever the
//!   query is refetched.
//! - [`GraphQLClient::mutate`]: a single mutation that, on success, refetches every
//!   watched query named in `refetch_queries`.
//!
//! There is no normalized cache. After a write the watched list is simply fetched again
//! and replaces what the caller held. This keeps the client trivially consistent with
//! the server for a single user, at the price of one extra round trip per mutation and
//! no handling of concurrent writers.

pub mod error;
pub mod watch;

pub use error::ClientError;
pub use watch::{QueryResult, QueryWatch};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, instrument, warn};

use crate::graphql::{GraphQLRequest, Operation, Transport};

/// Buffered results per watch before the fetch task waits for the consumer.
const WATCH_BUFFER: usize = 16;

struct WatchEntry {
    operation: &'static str,
    refetch: Arc<Notify>,
}

pub(crate) struct ClientInner {
    transport: Arc<dyn Transport>,
    watches: Mutex<HashMap<u64, WatchEntry>>,
    next_watch_id: AtomicU64,
}

/// A cheap-to-clone GraphQL client with query watches and refetch-after-mutation.
#[derive(Clone)]
pub struct GraphQLClient {
    inner: Arc<ClientInner>,
}

impl GraphQLClient {
    pub fn new(transport: impl Transport) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                watches: Mutex::new(HashMap::new()),
                next_watch_id: AtomicU64::new(1),
            }),
        }
    }

    /// Executes `O` once and decodes its payload.
    pub async fn execute<O: Operation>(
        &self,
        variables: &O::Variables,
    ) -> Result<O::Data, ClientError> {
        run_operation::<O>(self.inner.transport.as_ref(), variables).await
    }

    /// Opens a live watch on `O`.
    ///
    /// The first fetch starts immediately. Release the watch by dropping it.
    pub fn watch_query<O: Operation>(&self, variables: O::Variables) -> QueryWatch<O::Data> {
        let id = self.inner.next_watch_id.fetch_add(1, Ordering::SeqCst);
        let refetch = Arc::new(Notify::new());
        self.inner.watches.lock().insert(
            id,
            WatchEntry {
                operation: O::NAME,
                refetch: refetch.clone(),
            },
        );

        let (sender, receiver) = mpsc::channel(WATCH_BUFFER);
        let transport = self.inner.transport.clone();
        let trigger = refetch.clone();
        let task = tokio::spawn(async move {
            loop {
                let result = match run_operation::<O>(transport.as_ref(), &variables).await {
                    Ok(data) => QueryResult::ready(data),
                    Err(e) => {
                        warn!(operation = O::NAME, error = %e, "Watched query failed");
                        QueryResult::failed(e)
                    }
                };
                if sender.send(result).await.is_err() {
                    break;
                }
                trigger.notified().await;
                debug!(operation = O::NAME, "Refetching");
            }
        });

        info!(operation = O::NAME, watch_id = id, "Watch opened");
        QueryWatch {
            id,
            operation: O::NAME,
            receiver,
            refetch,
            task,
            client: self.inner.clone(),
        }
    }

    /// Executes mutation `O`; on success refetches every watch on `refetch_queries`.
    #[instrument(skip(self, variables, refetch_queries), fields(operation = O::NAME))]
    pub async fn mutate<O: Operation>(
        &self,
        variables: O::Variables,
        refetch_queries: &[&'static str],
    ) -> Result<O::Data, ClientError> {
        debug!(?variables, "Sending mutation");
        let data = run_operation::<O>(self.inner.transport.as_ref(), &variables).await?;
        for query in refetch_queries {
            let refetched = self.refetch(query);
            debug!(query, refetched, "Refetch requested");
        }
        Ok(data)
    }

    /// Asks every open watch on `operation` to fetch again. Returns how many were notified.
    pub fn refetch(&self, operation: &str) -> usize {
        let watches = self.inner.watches.lock();
        watches
            .values()
            .filter(|entry| entry.operation == operation)
            .inspect(|entry| entry.refetch.notify_one())
            .count()
    }

    /// Number of watches currently open on this client.
    pub fn active_watches(&self) -> usize {
        self.inner.watches.lock().len()
    }
}

async fn run_operation<O: Operation>(
    transport: &dyn Transport,
    variables: &O::Variables,
) -> Result<O::Data, ClientError> {
    let request =
        GraphQLRequest::for_operation::<O>(variables).map_err(|source| ClientError::Encode {
            operation: O::NAME,
            source,
        })?;
    let response = transport.execute(request).await?;
    if response.has_errors() {
        return Err(ClientError::GraphQL(response.errors));
    }
    match response.decode::<O::Data>() {
        Some(Ok(data)) => Ok(data),
        Some(Err(source)) => Err(ClientError::Decode {
            operation: O::NAME,
            source,
        }),
        None => Err(ClientError::NoData(O::NAME)),
    }
}
