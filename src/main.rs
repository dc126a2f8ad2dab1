use std::time::Duration;

use post_editor::config::EditorConfig;
use post_editor::editor::{EditorClient, EditorView};
use post_editor::lifecycle::{setup_tracing, EditorSystem};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = EditorConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting post editor");

    let system = EditorSystem::from_config(&config).map_err(|e| e.to_string())?;

    // A mutation and its refetch are two requests.
    let patience = config.request_timeout * 2;
    let outcome = walkthrough(&system.editor, patience).await;
    if let Err(ref e) = outcome {
        error!(error = %e, "Walkthrough failed");
    }

    system.shutdown().await?;
    outcome?;

    info!("Application completed successfully");
    Ok(())
}

/// Waits for a published view matching `predicate`, giving up after `patience`.
async fn settle(
    editor: &EditorClient,
    step: &str,
    patience: Duration,
    predicate: impl FnMut(&EditorView) -> bool,
) -> Result<EditorView, String> {
    tokio::time::timeout(patience, editor.wait_for(predicate))
        .await
        .map_err(|_| format!("{step}: no matching view after {patience:?}"))?
        .map_err(|e| e.to_string())
}

async fn walkthrough(editor: &EditorClient, patience: Duration) -> Result<(), String> {
    // Create through the form, the way a user would
    let span = tracing::info_span!("create");
    let post_id = async {
        editor.set_title("Hello").await.map_err(|e| e.to_string())?;
        editor
            .set_text("First post from the editor")
            .await
            .map_err(|e| e.to_string())?;
        editor.submit_create().await.map_err(|e| e.to_string())?;

        let view = settle(editor, "create", patience, |v| {
            v.in_flight == 0 && v.posts.iter().any(|p| p.title == "Hello")
        })
        .await?;
        info!(form_valid = view.form_valid, "Form cleared after create");
        view.posts
            .iter()
            .find(|p| p.title == "Hello")
            .map(|p| p.id.clone())
            .ok_or_else(|| "created post missing from list".to_string())
    }
    .instrument(span)
    .await?;

    info!(post_id = %post_id, "Post created successfully");

    let span = tracing::info_span!("update", post_id = %post_id);
    async {
        editor.start_edit(post_id.clone()).await.map_err(|e| e.to_string())?;
        editor
            .update(post_id.clone(), "Hello, again", "Now published", true)
            .await
            .map_err(|e| e.to_string())?;
        let view = settle(editor, "update", patience, |v| {
            !v.is_editing(&post_id) && v.post(&post_id).is_some_and(|p| p.is_published)
        })
        .await?;
        if let Some(post) = view.post(&post_id) {
            info!(title = %post.title, published = post.is_published, "Post updated");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("delete", post_id = %post_id);
    async {
        editor.delete(post_id.clone()).await.map_err(|e| e.to_string())?;
        settle(editor, "delete", patience, |v| {
            v.in_flight == 0 && v.post(&post_id).is_none()
        })
        .await?;
        info!("Post deleted");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let view = editor.view().await.map_err(|e| e.to_string())?;
    info!(size = view.posts.len(), error = ?view.error, "Final post list");
    Ok(())
}
