use serde::{Deserialize, Serialize};

/// A blog post as served by the GraphQL API.
///
/// The client never edits a `Post` in place. Every list refetch replaces the
/// whole collection with what the server returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    pub is_published: bool,
}

impl Post {
    /// Creates a new unpublished Post.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `title` - Post title
    /// * `text` - Post body
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            is_published: false,
        }
    }

    /// Returns the same post with the published flag set.
    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }
}

/// Payload for creating a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub text: String,
}

/// Payload for replacing an existing post's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub id: String,
    pub title: String,
    pub text: String,
    /// `isPublished` is a nullable `Boolean` in the schema; `None` leaves the flag as is.
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_uses_camel_case_on_the_wire() {
        let post = Post::new("post_1", "Hello", "World").published(true);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({"id": "post_1", "title": "Hello", "text": "World", "isPublished": true})
        );
    }

    #[test]
    fn test_update_accepts_missing_published_flag() {
        let update: PostUpdate =
            serde_json::from_value(json!({"id": "post_1", "title": "t", "text": "x"})).unwrap();
        assert_eq!(update.is_published, None);
    }
}
