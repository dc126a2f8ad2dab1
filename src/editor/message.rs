//! Messages processed by the editor loop.

use tokio::sync::oneshot;

use super::error::EditorError;
use super::form::FormField;
use super::state::EditorView;
use crate::client::ClientError;
use crate::model::Post;

/// One-shot response channel used by commands that answer.
pub type Response<T> = oneshot::Sender<Result<T, EditorError>>;

/// Requests sent by [`EditorClient`](super::EditorClient).
#[derive(Debug)]
pub enum EditorCommand {
    StartEdit {
        id: String,
    },
    CancelEdit {
        id: String,
    },
    SetField {
        field: FormField,
        value: String,
    },
    ResetForm,
    /// Validate the create form and, if it passes, dispatch `create` with its values.
    SubmitCreate {
        respond_to: Response<()>,
    },
    Create {
        title: String,
        text: String,
    },
    Update {
        id: String,
        title: String,
        text: String,
        is_published: bool,
    },
    Delete {
        id: String,
    },
    Refetch,
    View {
        respond_to: Response<EditorView>,
    },
}

/// What a mutation task yields back to the editor loop.
#[derive(Debug)]
pub enum MutationOutcome {
    Created(Result<Post, ClientError>),
    Updated {
        id: String,
        result: Result<Post, ClientError>,
    },
    Deleted {
        id: String,
        result: Result<Post, ClientError>,
    },
}
