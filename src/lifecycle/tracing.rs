//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the structured fields
//! (`post_id`, `operation`, `size`) carry the context instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and mutation outcomes
//! RUST_LOG=info cargo run
//!
//! # Payloads, GraphQL requests and every published view
//! RUST_LOG=debug cargo run
//!
//! # Only the editor actor
//! RUST_LOG=post_editor::editor=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Editor started`, `Store started`, and their shutdown lines
//! - **Query watch**: `Watch opened`, refetches at `debug`, failures at `warn`
//! - **Mutations**: one `mutation` span per dispatch carrying `operation`
//! - **Store**: `Created` / `Updated` / `Deleted` with `post_id` and `size`
//!
//! With `RUST_LOG=info` a create, update and delete round trip reads:
//!
//! ```text
//! INFO Store started size=0
//! INFO Editor started
//! INFO Watch opened operation="GetPost" watch_id=1
//! INFO Created post_id="post_1" size=1
//! INFO Post created post_id="post_1"
//! INFO Updated post_id="post_1"
//! INFO Post updated post_id="post_1"
//! INFO Deleted post_id="post_1" size=0
//! INFO Post deleted post_id="post_1"
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // structured fields carry the context
        .compact()
        .init();
}
