use anyhow::Result;
use prompttree_runtime::{PromptTree, RemoteStore};

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub async fn handle(workspace: &PromptTree, renderer: &ConsoleRenderer) -> Result<()> {
    let api_url = workspace.api_url();

    match workspace.coordinator().store().health().await {
        Ok(()) => renderer.render(presenters::present_health(api_url, None)),
        Err(err) => {
            tracing::debug!(error = %err, "health check failed");
            renderer.render(presenters::present_health(api_url, Some(err.to_string())))?;
            anyhow::bail!("API at {} is not reachable", api_url)
        }
    }
}
