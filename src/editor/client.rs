//! Type-safe handle to a running [`PostEditor`](super::PostEditor).

use std::fmt::Debug;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use super::error::EditorError;
use super::form::FormField;
use super::message::EditorCommand;
use super::state::EditorView;

/// Cheap-to-clone handle to the editor.
///
/// Commands are fire-and-forget: a returned `Ok(())` means the editor accepted the
/// command, not that the resulting mutation succeeded. Watch the published
/// [`EditorView`] to see outcomes.
#[derive(Clone)]
pub struct EditorClient {
    sender: mpsc::Sender<EditorCommand>,
    view: watch::Receiver<EditorView>,
}

impl EditorClient {
    pub(super) fn new(
        sender: mpsc::Sender<EditorCommand>,
        view: watch::Receiver<EditorView>,
    ) -> Self {
        Self { sender, view }
    }

    async fn send(&self, command: EditorCommand) -> Result<(), EditorError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| EditorError::ActorClosed)
    }

    /// Puts a post's row into inline-edit mode.
    #[instrument(skip(self))]
    pub async fn start_edit(&self, id: impl Into<String> + Debug) -> Result<(), EditorError> {
        self.send(EditorCommand::StartEdit { id: id.into() }).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_edit(&self, id: impl Into<String> + Debug) -> Result<(), EditorError> {
        self.send(EditorCommand::CancelEdit { id: id.into() }).await
    }

    pub async fn set_title(&self, value: impl Into<String>) -> Result<(), EditorError> {
        self.send(EditorCommand::SetField {
            field: FormField::Title,
            value: value.into(),
        })
        .await
    }

    pub async fn set_text(&self, value: impl Into<String>) -> Result<(), EditorError> {
        self.send(EditorCommand::SetField {
            field: FormField::Text,
            value: value.into(),
        })
        .await
    }

    pub async fn reset_form(&self) -> Result<(), EditorError> {
        self.send(EditorCommand::ResetForm).await
    }

    /// Submits the create form.
    ///
    /// Refuses with [`EditorError::InvalidForm`] and sends nothing when either field is
    /// blank.
    #[instrument(skip(self))]
    pub async fn submit_create(&self) -> Result<(), EditorError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(EditorCommand::SubmitCreate { respond_to }).await?;
        response.await.map_err(|_| EditorError::ActorDropped)?
    }

    /// Dispatches `CreateNewPost` with the given values, bypassing the form.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        title: impl Into<String> + Debug,
        text: impl Into<String> + Debug,
    ) -> Result<(), EditorError> {
        self.send(EditorCommand::Create {
            title: title.into(),
            text: text.into(),
        })
        .await
    }

    /// Dispatches `UpdatePost`. The post leaves edit mode once the update succeeds.
    #[instrument(skip(self, title, text))]
    pub async fn update(
        &self,
        id: impl Into<String> + Debug,
        title: impl Into<String>,
        text: impl Into<String>,
        is_published: bool,
    ) -> Result<(), EditorError> {
        self.send(EditorCommand::Update {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            is_published,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: impl Into<String> + Debug) -> Result<(), EditorError> {
        self.send(EditorCommand::Delete { id: id.into() }).await
    }

    /// Re-executes the posts query outside of any mutation.
    pub async fn refetch(&self) -> Result<(), EditorError> {
        self.send(EditorCommand::Refetch).await
    }

    /// Snapshot taken after every previously sent command has been processed.
    pub async fn view(&self) -> Result<EditorView, EditorError> {
        let (respond_to, response) = oneshot::channel();
        self.send(EditorCommand::View { respond_to }).await?;
        response.await.map_err(|_| EditorError::ActorDropped)?
    }

    /// The most recently published snapshot, without a round trip.
    pub fn current(&self) -> EditorView {
        self.view.borrow().clone()
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<EditorView> {
        self.view.clone()
    }

    /// Waits until a published snapshot satisfies `predicate`, and returns it.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&EditorView) -> bool,
    ) -> Result<EditorView, EditorError> {
        let mut view = self.view.clone();
        let snapshot = view
            .wait_for(predicate)
            .await
            .map_err(|_| EditorError::ActorClosed)?;
        Ok(snapshot.clone())
    }
}
