//! # Post Editor
//!
//! > **The editing core of a small blog admin, built from Tokio actors.**
//!
//! The crate lists posts, creates them from a two-field form, edits them inline and
//! deletes them, all through four GraphQL operations. What it actually cares about is
//! keeping three pieces of state consistent: the form, the set of posts being edited,
//! and the list of posts the server last returned.
//!
//! ## Design
//!
//! ### One owner for editor state
//! [`PostEditor`](editor::PostEditor) is a single task. Commands, query results and
//! mutation completions all arrive as messages and are applied one at a time, so the
//! state needs no locks. After every message a fresh
//! [`EditorView`](editor::EditorView) is published on a `watch` channel.
//!
//! ### Refetch, not cache merge
//! Mutations never patch the local list. Each successful mutation re-runs `GetPost`
//! and the list is replaced wholesale. There are no optimistic updates.
//!
//! ### Type-safe errors
//! Each layer has its own `thiserror` enum: [`TransportError`](graphql::TransportError),
//! [`ClientError`](client::ClientError), [`EditorError`](editor::EditorError),
//! [`StoreError`](backend::StoreError) and [`ConfigError`](config::ConfigError).
//!
//! ## Module Tour
//!
//! ### 1. The Editor ([`editor`])
//! - **Role**: Form Manager, Pending-Edit Tracker and Mutation Dispatcher behind one actor.
//! - **Key items**: [`PostEditor`](editor::PostEditor), [`EditorClient`](editor::EditorClient),
//!   [`PostForm`](editor::PostForm), [`PendingEdits`](editor::PendingEdits).
//!
//! ### 2. The Query Runner ([`client`])
//! - **Role**: Executes typed operations, keeps live query watches and refetches them
//!   after mutations.
//! - **Key items**: [`GraphQLClient`](client::GraphQLClient), [`QueryWatch`](client::QueryWatch).
//!
//! ### 3. The Wire ([`graphql`])
//! - **Role**: Request and response bodies, the four operations, and transports.
//! - **Key items**: [`Operation`](graphql::Operation), [`HttpTransport`](graphql::HttpTransport),
//!   [`MockTransport`](graphql::MockTransport).
//!
//! ### 4. The Backend ([`backend`])
//! - **Role**: An in-memory post store actor for running without a server.
//!
//! ### 5. The Orchestrator ([`lifecycle`]) and [`config`]
//! - **Role**: Reads the environment, spawns the actors, shuts them down.
//! - **Key items**: [`EditorSystem`](lifecycle::EditorSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## Quick Start
//!
//! ```bash
//! # In-memory backend with info logs
//! RUST_LOG=info cargo run
//!
//! # Against a GraphQL server
//! POST_EDITOR_ENDPOINT=http://localhost:4000/graphql RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod editor;
pub mod graphql;
pub mod lifecycle;
pub mod model;
