//! `HttpTransport` against a local mock HTTP server.

use std::time::Duration;

use post_editor::client::{ClientError, GraphQLClient};
use post_editor::graphql::{
    CreateNewPost, CreatePostVariables, GetPost, HttpTransport, TransportError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GraphQLClient {
    let endpoint = format!("{}/graphql", server.uri());
    GraphQLClient::new(HttpTransport::new(endpoint, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_query_is_posted_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "operationName": "GetPost" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "posts": [
                { "id": "1", "title": "Remote", "text": "body", "isPublished": true }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = client(&server).execute::<GetPost>(&()).await.unwrap();
    assert_eq!(data.posts.len(), 1);
    assert_eq!(data.posts[0].title, "Remote");
    assert!(data.posts[0].is_published);
}

#[tokio::test]
async fn test_mutation_sends_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CreateNewPost",
            "variables": { "title": "Hi", "text": "there" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createPost": {
                "id": "7", "title": "Hi", "text": "there", "isPublished": false
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vars = CreatePostVariables {
        title: "Hi".into(),
        text: "there".into(),
    };
    let data = client(&server).mutate::<CreateNewPost>(vars, &[]).await.unwrap();
    assert_eq!(data.create_post.id, "7");
}

#[tokio::test]
async fn test_graphql_errors_become_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Cannot query field \"posts\"" }]
        })))
        .mount(&server)
        .await;

    let err = client(&server).execute::<GetPost>(&()).await.unwrap_err();
    assert!(matches!(err, ClientError::GraphQL(ref errors) if errors.len() == 1));
    assert_eq!(err.to_string(), "GraphQL error: Cannot query field \"posts\"");
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).execute::<GetPost>(&()).await.unwrap_err();
    match err {
        ClientError::Transport(TransportError::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected HTTP status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_watch_refetches_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "GetPost" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "posts": [] } })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut watch = client.watch_query::<GetPost>(());
    assert!(watch.next().await.unwrap().data.unwrap().posts.is_empty());

    assert_eq!(client.refetch("GetPost"), 1);
    let second = watch.next().await.unwrap();
    assert!(second.error.is_none());
}
