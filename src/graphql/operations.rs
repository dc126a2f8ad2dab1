//! # Typed Operations
//!
//! Every GraphQL document the editor sends is a zero-sized type implementing
//! [`Operation`]. The associated `Variables` and `Data` types pin down the payload
//! shape of each operation, so a `CreateNewPost` result can't be read as a
//! `DeletePost` result and a missing variable is a compile error.
//!
//! | Operation         | Kind     | Variables             | Data              |
//! |-------------------|----------|-----------------------|-------------------|
//! | [`GetPost`]       | query    | `()`                  | [`PostsData`]     |
//! | [`CreateNewPost`] | mutation | [`CreatePostVariables`] | [`CreatePostData`] |
//! | [`UpdatePost`]    | mutation | [`UpdatePostVariables`] | [`UpdatePostData`] |
//! | [`DeletePost`]    | mutation | [`DeletePostVariables`] | [`DeletePostData`] |

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

use super::request::OperationKind;
use crate::model::Post;

/// A named GraphQL document with typed variables and result.
pub trait Operation: Send + Sync + 'static {
    /// Operation name, sent as `operationName` and used to match refetch requests.
    const NAME: &'static str;

    const DOCUMENT: &'static str;

    const KIND: OperationKind;

    type Variables: Serialize + Send + Sync + Debug + 'static;

    type Data: DeserializeOwned + Send + Debug + 'static;
}

pub struct GetPost;

impl Operation for GetPost {
    const NAME: &'static str = "GetPost";
    const DOCUMENT: &'static str = r#"
query GetPost {
  posts {
    id
    title
    text
    isPublished
  }
}
"#;
    const KIND: OperationKind = OperationKind::Query;
    type Variables = ();
    type Data = PostsData;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostsData {
    pub posts: Vec<Post>,
}

pub struct CreateNewPost;

impl Operation for CreateNewPost {
    const NAME: &'static str = "CreateNewPost";
    const DOCUMENT: &'static str = r#"
mutation CreateNewPost($title: String!, $text: String!) {
  createPost(input: { title: $title, text: $text }) {
    id
    title
    text
    isPublished
  }
}
"#;
    const KIND: OperationKind = OperationKind::Mutation;
    type Variables = CreatePostVariables;
    type Data = CreatePostData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostVariables {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostData {
    pub create_post: Post,
}

pub struct UpdatePost;

impl Operation for UpdatePost {
    const NAME: &'static str = "UpdatePost";
    const DOCUMENT: &'static str = r#"
mutation UpdatePost($id: ID!, $title: String!, $text: String!, $isPublished: Boolean) {
  updatePost(input: { id: $id, title: $title, text: $text, isPublished: $isPublished }) {
    id
    title
    text
    isPublished
  }
}
"#;
    const KIND: OperationKind = OperationKind::Mutation;
    type Variables = UpdatePostVariables;
    type Data = UpdatePostData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostVariables {
    pub id: String,
    pub title: String,
    pub text: String,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostData {
    pub update_post: Post,
}

pub struct DeletePost;

impl Operation for DeletePost {
    const NAME: &'static str = "DeletePost";
    const DOCUMENT: &'static str = r#"
mutation DeletePost($id: ID!) {
  deletePost(id: $id) {
    id
    title
    text
    isPublished
  }
}
"#;
    const KIND: OperationKind = OperationKind::Mutation;
    type Variables = DeletePostVariables;
    type Data = DeletePostData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePostVariables {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostData {
    pub delete_post: Post,
}
