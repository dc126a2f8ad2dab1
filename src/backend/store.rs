//! # Post Store Actor
//!
//! An in-memory stand-in for the server's post collection. One task owns the posts and
//! handles [`StoreRequest`]s one at a time, so the map needs no lock. Posts keep their
//! creation order, ids are `post_1`, `post_2`, ... and are never reused.

use indexmap::IndexMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::error::StoreError;
use crate::model::{Post, PostCreate, PostUpdate};

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    List {
        respond_to: Response<Vec<Post>>,
    },
    Create {
        params: PostCreate,
        respond_to: Response<Post>,
    },
    Update {
        update: PostUpdate,
        respond_to: Response<Post>,
    },
    /// Answers with the removed post.
    Delete {
        id: String,
        respond_to: Response<Post>,
    },
}

pub struct PostStore {
    receiver: mpsc::Receiver<StoreRequest>,
    posts: IndexMap<String, Post>,
    next_id: u32,
}

impl PostStore {
    /// Creates the store and a client for it.
    ///
    /// `buffer_size` is the request channel capacity, at least 1; senders wait when it
    /// is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let store = Self {
            receiver,
            posts: IndexMap::new(),
            next_id: 1,
        };
        (store, StoreClient::new(sender))
    }

    /// Inserts posts before the store starts serving requests.
    pub fn seed(mut self, posts: impl IntoIterator<Item = PostCreate>) -> Self {
        for params in posts {
            self.insert(params);
        }
        self
    }

    fn insert(&mut self, params: PostCreate) -> Post {
        let id = format!("post_{}", self.next_id);
        self.next_id += 1;
        let post = Post::new(id.clone(), params.title, params.text);
        self.posts.insert(id, post.clone());
        post
    }

    /// Runs the store's event loop until every [`StoreClient`] is dropped.
    pub async fn run(mut self) {
        info!(size = self.posts.len(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    debug!(size = self.posts.len(), "List");
                    let _ = respond_to.send(Ok(self.posts.values().cloned().collect()));
                }
                StoreRequest::Create { params, respond_to } => {
                    debug!(?params, "Create");
                    let post = self.insert(params);
                    info!(post_id = %post.id, size = self.posts.len(), "Created");
                    let _ = respond_to.send(Ok(post));
                }
                StoreRequest::Update { update, respond_to } => {
                    debug!(?update, "Update");
                    match self.posts.get_mut(&update.id) {
                        Some(post) => {
                            post.title = update.title;
                            post.text = update.text;
                            if let Some(flag) = update.is_published {
                                post.is_published = flag;
                            }
                            info!(post_id = %post.id, "Updated");
                            let _ = respond_to.send(Ok(post.clone()));
                        }
                        None => {
                            warn!(post_id = %update.id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(update.id)));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(post_id = %id, "Delete");
                    match self.posts.shift_remove(&id) {
                        Some(post) => {
                            info!(post_id = %id, size = self.posts.len(), "Deleted");
                            let _ = respond_to.send(Ok(post));
                        }
                        None => {
                            warn!(post_id = %id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(id)));
                        }
                    }
                }
            }
        }

        info!(size = self.posts.len(), "Store shutdown");
    }
}

/// A type-safe client for a running [`PostStore`].
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: PostCreate) -> Result<Post, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn update(&self, update: PostUpdate) -> Result<Post, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update { update, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn delete(&self, id: impl Into<String>) -> Result<Post, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete {
                id: id.into(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
