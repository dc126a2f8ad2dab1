//! Editor behavior against a scripted transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use post_editor::client::GraphQLClient;
use post_editor::config::EditorConfig;
use post_editor::editor::{EditorClient, EditorError, EditorView, PostEditor};
use post_editor::graphql::{
    CreateNewPost, DeletePost, GetPost, GraphQLRequest, GraphQLResponse, MockTransport,
    OperationKind, Transport, TransportError, UpdatePost,
};
use post_editor::model::Post;
use serde_json::{json, Value};

/// Holds every mutation for `delay` before answering from the wrapped mock.
struct SlowMutations {
    inner: MockTransport,
    delay: Duration,
    answered: Arc<AtomicBool>,
}

#[async_trait]
impl Transport for SlowMutations {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        if request.kind != OperationKind::Mutation {
            return self.inner.execute(request).await;
        }
        tokio::time::sleep(self.delay).await;
        let response = self.inner.execute(request).await;
        self.answered.store(true, Ordering::SeqCst);
        response
    }
}

fn post_json(id: &str, title: &str, published: bool) -> Value {
    serde_json::to_value(Post::new(id, title, format!("{title} body")).published(published))
        .unwrap()
}

fn posts_json(posts: &[Value]) -> Value {
    json!({ "posts": posts })
}

fn start(mock: &MockTransport) -> EditorClient {
    let (editor, client) =
        PostEditor::new(GraphQLClient::new(mock.clone()), &EditorConfig::default());
    tokio::spawn(editor.run());
    client
}

async fn wait(editor: &EditorClient, predicate: impl FnMut(&EditorView) -> bool) -> EditorView {
    tokio::time::timeout(Duration::from_secs(5), editor.wait_for(predicate))
        .await
        .expect("Timed out waiting for editor view")
        .expect("Editor stopped")
}

#[tokio::test]
async fn test_initial_view_is_loading_then_lists_posts() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[
        post_json("p1", "One", false),
        post_json("p2", "Two", true),
    ]));

    let (editor, client) =
        PostEditor::new(GraphQLClient::new(mock.clone()), &EditorConfig::default());
    let initial = client.current();
    assert!(initial.loading);
    assert!(initial.posts.is_empty());
    assert!(initial.error.is_none());

    tokio::spawn(editor.run());
    let view = wait(&client, |v| !v.loading).await;
    assert_eq!(view.posts.len(), 2);
    assert_eq!(view.posts[1].id, "p2");
    assert!(view.posts[1].is_published);
    mock.verify();
}

#[tokio::test]
async fn test_submit_create_sends_one_mutation_and_clears_form() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[]));
    mock.expect::<CreateNewPost>()
        .return_data(json!({ "createPost": post_json("p1", "Hello", false) }));
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "Hello", false)]));

    let editor = start(&mock);
    wait(&editor, |v| !v.loading).await;

    editor.set_title("Hello").await.unwrap();
    editor.set_text("World").await.unwrap();
    editor.submit_create().await.unwrap();

    let view = wait(&editor, |v| v.in_flight == 0 && v.posts.len() == 1).await;
    assert_eq!(view.form.title, None);
    assert_eq!(view.form.text, None);
    assert!(!view.form_valid);

    let creates = mock.requests_for::<CreateNewPost>();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].variables, Some(json!({ "title": "Hello", "text": "World" })));
    mock.verify();
}

#[tokio::test]
async fn test_submit_create_refuses_blank_fields() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[]));

    let editor = start(&mock);
    wait(&editor, |v| !v.loading).await;

    editor.set_title("Hello").await.unwrap();
    editor.set_text("   ").await.unwrap();
    let result = editor.submit_create().await;
    assert!(matches!(result, Err(EditorError::InvalidForm(ref problems)) if problems.len() == 1));

    let view = editor.view().await.unwrap();
    assert!(!view.form_valid);
    assert_eq!(view.form.title.as_deref(), Some("Hello"));
    assert_eq!(view.in_flight, 0);
    assert!(mock.requests_for::<CreateNewPost>().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_update_sends_all_variables_and_ends_edit() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));
    mock.expect::<UpdatePost>()
        .return_data(json!({ "updatePost": post_json("p1", "Uno", true) }));
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "Uno", true)]));

    let editor = start(&mock);
    wait(&editor, |v| !v.loading).await;

    editor.start_edit("p1").await.unwrap();
    assert!(editor.view().await.unwrap().is_editing("p1"));

    editor.update("p1", "Uno", "One body", true).await.unwrap();
    let view = wait(&editor, |v| {
        v.in_flight == 0 && v.post("p1").is_some_and(|p| p.title == "Uno")
    })
    .await;
    assert!(!view.is_editing("p1"));

    let updates = mock.requests_for::<UpdatePost>();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].variables,
        Some(json!({ "id": "p1", "title": "Uno", "text": "One body", "isPublished": true }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_failed_update_keeps_post_pending() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));
    mock.expect::<UpdatePost>().return_graphql_error("Post not found: p1");

    let editor = start(&mock);
    wait(&editor, |v| !v.loading).await;

    editor.start_edit("p1").await.unwrap();
    editor.update("p1", "Uno", "x", false).await.unwrap();

    // Mutation errors are logged, never shown, and trigger no refetch.
    let view = wait(&editor, |v| v.in_flight == 0).await;
    assert!(view.is_editing("p1"));
    assert!(view.error.is_none());
    assert_eq!(mock.requests_for::<GetPost>().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_start_then_cancel_edit() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[]));
    let editor = start(&mock);

    editor.start_edit("p1").await.unwrap();
    editor.cancel_edit("p1").await.unwrap();
    assert!(editor.view().await.unwrap().pending.is_empty());

    // Starting twice is the same as starting once.
    editor.start_edit("p1").await.unwrap();
    editor.start_edit("p1").await.unwrap();
    assert_eq!(editor.view().await.unwrap().pending, vec!["p1".to_string()]);
    editor.cancel_edit("p1").await.unwrap();
    assert!(!editor.view().await.unwrap().is_editing("p1"));
}

#[tokio::test]
async fn test_delete_refetches_list() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[
        post_json("p1", "One", false),
        post_json("p2", "Two", false),
    ]));
    mock.expect::<DeletePost>()
        .return_data(json!({ "deletePost": post_json("p2", "Two", false) }));
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));

    let editor = start(&mock);
    wait(&editor, |v| v.posts.len() == 2).await;

    editor.set_title("draft").await.unwrap();
    editor.delete("p2").await.unwrap();

    let view = wait(&editor, |v| v.in_flight == 0 && v.posts.len() == 1).await;
    assert!(view.post("p2").is_none());
    assert_eq!(view.form.title, None);
    assert_eq!(
        mock.requests_for::<DeletePost>()[0].variables,
        Some(json!({ "id": "p2" }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_delete_keeps_form_when_reset_disabled() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));
    mock.expect::<DeletePost>()
        .return_data(json!({ "deletePost": post_json("p1", "One", false) }));
    mock.expect::<GetPost>().return_data(posts_json(&[]));

    let config = EditorConfig {
        reset_form_on_delete: false,
        ..EditorConfig::default()
    };
    let (editor, client) = PostEditor::new(GraphQLClient::new(mock.clone()), &config);
    tokio::spawn(editor.run());
    wait(&client, |v| v.posts.len() == 1).await;

    client.set_title("draft").await.unwrap();
    client.delete("p1").await.unwrap();

    let view = wait(&client, |v| v.in_flight == 0 && v.posts.is_empty()).await;
    assert_eq!(view.form.title.as_deref(), Some("draft"));
    mock.verify();
}

#[tokio::test]
async fn test_query_error_is_surfaced_and_keeps_posts() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));
    mock.expect::<GetPost>().return_transport_error("connection refused");

    let editor = start(&mock);
    wait(&editor, |v| v.posts.len() == 1).await;

    editor.refetch().await.unwrap();
    let view = wait(&editor, |v| v.error.is_some()).await;
    assert!(!view.loading);
    assert_eq!(view.posts.len(), 1);
    assert!(view.error.unwrap().to_string().contains("connection refused"));
    mock.verify();
}

#[tokio::test]
async fn test_editor_stops_when_clients_dropped() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>().return_data(posts_json(&[]));

    let graphql = GraphQLClient::new(mock.clone());
    let (editor, client) = PostEditor::new(graphql.clone(), &EditorConfig::default());
    let handle = tokio::spawn(editor.run());
    wait(&client, |v| !v.loading).await;
    assert_eq!(graphql.active_watches(), 1);

    drop(client);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Editor did not stop")
        .unwrap();
    assert_eq!(graphql.active_watches(), 0);
}

#[tokio::test]
async fn test_editor_finishes_in_flight_mutations_before_stopping() {
    let mock = MockTransport::new();
    mock.expect::<GetPost>()
        .return_data(posts_json(&[post_json("p1", "One", false)]));
    mock.expect::<DeletePost>().return_graphql_error("Post not found: p1");

    let answered = Arc::new(AtomicBool::new(false));
    let transport = SlowMutations {
        inner: mock.clone(),
        delay: Duration::from_millis(300),
        answered: answered.clone(),
    };
    let (editor, client) = PostEditor::new(GraphQLClient::new(transport), &EditorConfig::default());
    let views = client.subscribe();
    let handle = tokio::spawn(editor.run());
    wait(&client, |v| v.posts.len() == 1).await;

    client.delete("p1").await.unwrap();
    wait(&client, |v| v.in_flight == 1).await;
    drop(client);

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Editor did not stop")
        .unwrap();
    assert!(answered.load(Ordering::SeqCst));
    assert_eq!(views.borrow().in_flight, 0);
    assert_eq!(views.borrow().posts.len(), 1);
    mock.verify();
}
