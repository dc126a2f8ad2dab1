//! # Post Editor Actor
//!
//! The editor is one Tokio task that owns [`EditorState`] and processes, strictly in
//! arrival order:
//!
//! 1. commands from [`EditorClient`] handles,
//! 2. results from the `GetPost` watch,
//! 3. completions of the mutations it dispatched.
//!
//! Mutations run in their own tasks so the loop never waits on the network. The tasks
//! live in a `JoinSet` owned by the editor; each one yields a [`MutationOutcome`] that
//! is applied like any other event, so editor state is only ever touched from this
//! loop. Once the last client is gone the editor stops taking commands but keeps
//! running until every dispatched mutation has completed and been logged. There is no
//! deduplication: two updates for the same post may both be in flight, and whichever
//! completes last wins.
//!
//! After every event the loop publishes a fresh [`EditorView`] on a `watch` channel.

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::client::EditorClient;
use super::error::EditorError;
use super::message::{EditorCommand, MutationOutcome};
use super::state::{EditorState, EditorView};
use crate::client::{ClientError, GraphQLClient};
use crate::config::EditorConfig;
use crate::graphql::{
    CreateNewPost, CreatePostVariables, DeletePost, DeletePostVariables, GetPost, Operation,
    UpdatePost, UpdatePostVariables,
};

/// Queries refetched after every successful mutation.
const REFETCH_QUERIES: &[&str] = &[GetPost::NAME];

pub struct PostEditor {
    receiver: mpsc::Receiver<EditorCommand>,
    mutations: JoinSet<MutationOutcome>,
    state: EditorState,
    client: GraphQLClient,
    view: watch::Sender<EditorView>,
}

impl PostEditor {
    /// Creates the editor and a client for it. Nothing is fetched until [`run`](Self::run).
    pub fn new(client: GraphQLClient, config: &EditorConfig) -> (Self, EditorClient) {
        let (sender, receiver) = mpsc::channel(config.command_buffer.max(1));
        let state = EditorState::new(config.reset_form_on_delete);
        let (view, view_rx) = watch::channel(state.view());

        let editor = Self {
            receiver,
            mutations: JoinSet::new(),
            state,
            client,
            view,
        };
        (editor, EditorClient::new(sender, view_rx))
    }

    /// Runs the editor until every [`EditorClient`] is dropped.
    ///
    /// Mutations still in flight at that point are awaited and their outcomes handled.
    /// The posts watch is opened here and dropped on exit, which stops its fetch task.
    pub async fn run(mut self) {
        info!("Editor started");
        let mut posts = self.client.watch_query::<GetPost>(());

        loop {
            tokio::select! {
                Some(result) = posts.next() => {
                    self.state.apply_query_result(result);
                }
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(joined) = self.mutations.join_next(), if !self.mutations.is_empty() => {
                    self.handle_joined(joined);
                }
            }
            self.view.send_replace(self.state.view());
        }

        if !self.mutations.is_empty() {
            info!(in_flight = self.mutations.len(), "Waiting for mutations");
        }
        while let Some(joined) = self.mutations.join_next().await {
            self.handle_joined(joined);
            self.view.send_replace(self.state.view());
        }

        drop(posts);
        info!(
            posts = self.state.posts().len(),
            pending = self.state.pending().len(),
            in_flight = self.state.in_flight(),
            "Shutdown"
        );
    }

    fn handle_command(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::StartEdit { id } => {
                let started = self.state.start_edit(id.clone());
                debug!(post_id = %id, started, "Start edit");
            }
            EditorCommand::CancelEdit { id } => {
                let cancelled = self.state.cancel_edit(&id);
                debug!(post_id = %id, cancelled, "Cancel edit");
            }
            EditorCommand::SetField { field, value } => {
                self.state.set_field(field, value);
            }
            EditorCommand::ResetForm => self.state.reset_form(),
            EditorCommand::SubmitCreate { respond_to } => {
                let form = self.state.form();
                if !form.is_valid() {
                    let problems = form
                        .errors()
                        .into_iter()
                        .map(|(field, e)| format!("{field} {e}"))
                        .collect::<Vec<_>>();
                    warn!(?problems, "Create refused");
                    let _ = respond_to.send(Err(EditorError::InvalidForm(problems)));
                    return;
                }
                let values = form.get_values();
                self.dispatch_create(
                    values.title.unwrap_or_default(),
                    values.text.unwrap_or_default(),
                );
                let _ = respond_to.send(Ok(()));
            }
            EditorCommand::Create { title, text } => self.dispatch_create(title, text),
            EditorCommand::Update {
                id,
                title,
                text,
                is_published,
            } => {
                let variables = UpdatePostVariables {
                    id: id.clone(),
                    title,
                    text,
                    is_published,
                };
                self.dispatch::<UpdatePost, _>(variables, move |result| MutationOutcome::Updated {
                    id,
                    result: result.map(|data| data.update_post),
                });
            }
            EditorCommand::Delete { id } => {
                let variables = DeletePostVariables { id: id.clone() };
                self.dispatch::<DeletePost, _>(variables, move |result| MutationOutcome::Deleted {
                    id,
                    result: result.map(|data| data.delete_post),
                });
            }
            EditorCommand::Refetch => {
                self.client.refetch(GetPost::NAME);
            }
            EditorCommand::View { respond_to } => {
                let _ = respond_to.send(Ok(self.state.view()));
            }
        }
    }

    fn dispatch_create(&mut self, title: String, text: String) {
        let variables = CreatePostVariables { title, text };
        self.dispatch::<CreateNewPost, _>(variables, |result| {
            MutationOutcome::Created(result.map(|data| data.create_post))
        });
    }

    /// Fires mutation `O` in its own task; `complete` turns its result into an outcome.
    fn dispatch<O, F>(&mut self, variables: O::Variables, complete: F)
    where
        O: Operation,
        F: FnOnce(Result<O::Data, ClientError>) -> MutationOutcome + Send + 'static,
    {
        self.state.mutation_started();
        let client = self.client.clone();
        let span = info_span!("mutation", operation = O::NAME);
        self.mutations.spawn(
            async move { complete(client.mutate::<O>(variables, REFETCH_QUERIES).await) }
                .instrument(span),
        );
    }

    fn handle_joined(&mut self, joined: Result<MutationOutcome, JoinError>) {
        match joined {
            Ok(outcome) => self.handle_outcome(outcome),
            Err(e) => {
                self.state.mutation_finished();
                error!(error = %e, "Mutation task failed");
            }
        }
    }

    fn handle_outcome(&mut self, outcome: MutationOutcome) {
        self.state.mutation_finished();
        match outcome {
            MutationOutcome::Created(Ok(post)) => {
                info!(post_id = %post.id, "Post created");
                self.state.on_create_succeeded(&post);
            }
            MutationOutcome::Updated { id, result: Ok(post) } => {
                info!(post_id = %id, "Post updated");
                self.state.on_update_succeeded(&post);
            }
            MutationOutcome::Deleted { id, result: Ok(post) } => {
                info!(post_id = %id, "Post deleted");
                self.state.on_delete_succeeded(&post);
            }
            MutationOutcome::Created(Err(e)) => {
                error!(error = %e, "Create failed");
            }
            MutationOutcome::Updated { id, result: Err(e) } => {
                error!(post_id = %id, error = %e, "Update failed");
            }
            MutationOutcome::Deleted { id, result: Err(e) } => {
                error!(post_id = %id, error = %e, "Delete failed");
            }
        }
    }
}
