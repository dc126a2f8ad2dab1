use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::backend::{InMemoryTransport, PostStore};
use crate::client::GraphQLClient;
use crate::config::EditorConfig;
use crate::editor::{EditorClient, PostEditor};
use crate::graphql::{HttpTransport, TransportError};
use crate::model::PostCreate;

/// Starts the post editor and whatever backend it talks to, and stops them again.
///
/// With an endpoint configured the editor speaks HTTP to that server. Without one a
/// [`PostStore`] actor is spawned next to the editor and serves the four operations
/// in memory.
///
/// # Example
///
/// ```ignore
/// let system = EditorSystem::from_config(&EditorConfig::from_env()?)?;
///
/// system.editor.create("Hello", "World").await?;
/// let view = system.editor.wait_for(|v| v.posts.len() == 1).await?;
///
/// system.shutdown().await?;
/// ```
pub struct EditorSystem {
    /// Handle to the editor actor.
    pub editor: EditorClient,

    handles: Vec<JoinHandle<()>>,
}

impl EditorSystem {
    /// Picks HTTP or in-memory from `config.endpoint`.
    pub fn from_config(config: &EditorConfig) -> Result<Self, TransportError> {
        match config.endpoint {
            Some(ref endpoint) => Self::connect(endpoint, config),
            None => Ok(Self::in_memory(config)),
        }
    }

    /// Runs against a remote GraphQL server.
    pub fn connect(endpoint: &str, config: &EditorConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(endpoint, config.request_timeout)?;
        info!(endpoint, "Using HTTP backend");

        let (editor, editor_client) = PostEditor::new(GraphQLClient::new(transport), config);
        let handle = tokio::spawn(editor.run());

        Ok(Self {
            editor: editor_client,
            handles: vec![handle],
        })
    }

    /// Runs against an empty in-memory store.
    pub fn in_memory(config: &EditorConfig) -> Self {
        Self::seeded(config, Vec::new())
    }

    /// Runs against an in-memory store that already holds `posts`.
    pub fn seeded(config: &EditorConfig, posts: Vec<PostCreate>) -> Self {
        // 1. Backend first, the editor fetches as soon as it starts
        let (store, store_client) = PostStore::new(config.command_buffer);
        let store_handle = tokio::spawn(store.seed(posts).run());

        // 2. Editor owns the only transport, and with it the only store client
        let client = GraphQLClient::new(InMemoryTransport::new(store_client));
        let (editor, editor_client) = PostEditor::new(client, config);
        let editor_handle = tokio::spawn(editor.run());

        info!("Using in-memory backend");
        Self {
            editor: editor_client,
            handles: vec![editor_handle, store_handle],
        }
    }

    /// Gracefully shuts down every task the system started.
    ///
    /// Dropping the editor handle closes the editor's command channel. The editor then
    /// releases its query watch and its transport, which in turn closes the store.
    /// Clones of [`EditorClient`] held elsewhere keep the editor alive, so drop them
    /// first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all tasks exit cleanly
    /// - `Err(String)` if any task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.editor);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(format!("Task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
