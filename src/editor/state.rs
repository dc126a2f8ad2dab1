//! Editor state and the snapshot published to the view.
//!
//! [`EditorState`] is plain data with synchronous transitions. The
//! [`PostEditor`](super::PostEditor) actor owns the only instance and calls these
//! methods from its loop, one event at a time.

use std::sync::Arc;

use tracing::debug;

use super::form::{FormField, FormValues, PostForm};
use super::pending::PendingEdits;
use crate::client::{ClientError, QueryResult};
use crate::graphql::PostsData;
use crate::model::Post;

/// Everything the editor knows.
#[derive(Debug)]
pub struct EditorState {
    posts: Vec<Post>,
    loading: bool,
    error: Option<Arc<ClientError>>,
    form: PostForm,
    pending: PendingEdits,
    in_flight: usize,
    reset_form_on_delete: bool,
}

impl EditorState {
    /// Nothing fetched yet: no posts, `loading` set.
    pub fn new(reset_form_on_delete: bool) -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            error: None,
            form: PostForm::new(),
            pending: PendingEdits::new(),
            in_flight: 0,
            reset_form_on_delete,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&Arc<ClientError>> {
        self.error.as_ref()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn pending(&self) -> &PendingEdits {
        &self.pending
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // --- Query Runner ---

    /// Takes one watch emission. The list is replaced wholesale when data is present
    /// and kept as is otherwise.
    pub fn apply_query_result(&mut self, result: QueryResult<PostsData>) {
        if let Some(data) = result.data {
            self.posts = data.posts;
        }
        self.loading = result.loading;
        self.error = result.error;
        debug!(
            posts = self.posts.len(),
            loading = self.loading,
            error = self.error.is_some(),
            "Query result applied"
        );
    }

    // --- Form Manager ---

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    // --- Pending-Edit Tracker ---

    pub fn start_edit(&mut self, id: impl Into<String>) -> bool {
        self.pending.start(id)
    }

    pub fn cancel_edit(&mut self, id: &str) -> bool {
        self.pending.cancel(id)
    }

    // --- Mutation completions ---

    pub fn mutation_started(&mut self) {
        self.in_flight += 1;
    }

    pub fn mutation_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn on_create_succeeded(&mut self, _created: &Post) {
        self.form.reset();
    }

    /// Ends the edit of the post the server reports as updated.
    pub fn on_update_succeeded(&mut self, updated: &Post) {
        self.pending.cancel(&updated.id);
    }

    pub fn on_delete_succeeded(&mut self, _deleted: &Post) {
        if self.reset_form_on_delete {
            self.clear_form_after_delete();
        }
    }

    /// Clears the create form once a delete has gone through.
    ///
    /// The form is unrelated to the deleted row. Disabled by `reset_form_on_delete`.
    pub fn clear_form_after_delete(&mut self) {
        self.form.reset();
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            posts: self.posts.clone(),
            loading: self.loading,
            error: self.error.clone(),
            form: self.form.get_values(),
            form_valid: self.form.is_valid(),
            pending: self.pending.to_vec(),
            in_flight: self.in_flight,
        }
    }
}

/// Render-ready snapshot of the editor, published after every change.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<Arc<ClientError>>,
    pub form: FormValues,
    pub form_valid: bool,
    /// Ids in inline-edit mode, in the order editing started.
    pub pending: Vec<String>,
    /// Mutations dispatched and not yet completed.
    pub in_flight: usize,
}

impl EditorView {
    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.pending.iter().any(|p| p == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::TransportError;

    fn posts(ids: &[&str]) -> PostsData {
        PostsData {
            posts: ids.iter().map(|id| Post::new(*id, "t", "x")).collect(),
        }
    }

    #[test]
    fn test_initial_state_is_loading_and_empty() {
        let state = EditorState::new(true);
        let view = state.view();
        assert!(view.loading);
        assert!(view.posts.is_empty());
        assert!(view.error.is_none());
        assert!(!view.form_valid);
    }

    #[test]
    fn test_first_result_ends_loading() {
        let mut state = EditorState::new(true);
        state.apply_query_result(QueryResult::ready(posts(&["p1", "p2"])));
        assert!(!state.is_loading());
        assert_eq!(state.posts().len(), 2);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_posts() {
        let mut state = EditorState::new(true);
        state.apply_query_result(QueryResult::ready(posts(&["p1"])));

        let err = ClientError::Transport(TransportError::Unavailable("down".into()));
        state.apply_query_result(QueryResult::failed(err));

        assert_eq!(state.posts().len(), 1);
        assert!(state.error().is_some());

        state.apply_query_result(QueryResult::ready(posts(&[])));
        assert!(state.posts().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_update_success_ends_edit_for_returned_id() {
        let mut state = EditorState::new(true);
        state.start_edit("p1");
        state.start_edit("p2");

        state.on_update_succeeded(&Post::new("p1", "t", "x"));
        assert_eq!(state.view().pending, vec!["p2".to_string()]);
    }

    #[test]
    fn test_delete_success_resets_form_unless_disabled() {
        let deleted = Post::new("p1", "t", "x");

        let mut state = EditorState::new(true);
        state.set_field(FormField::Title, "draft");
        state.on_delete_succeeded(&deleted);
        assert_eq!(state.form().get_values(), FormValues::default());

        let mut state = EditorState::new(false);
        state.set_field(FormField::Title, "draft");
        state.on_delete_succeeded(&deleted);
        assert_eq!(state.form().get_values().title.as_deref(), Some("draft"));
    }

    #[test]
    fn test_in_flight_never_underflows() {
        let mut state = EditorState::new(true);
        state.mutation_finished();
        assert_eq!(state.in_flight(), 0);
        state.mutation_started();
        state.mutation_started();
        state.mutation_finished();
        assert_eq!(state.view().in_flight, 1);
    }
}
