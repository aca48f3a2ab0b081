use anyhow::{Context, Result};
use prompttree_runtime::PromptTree;
use std::path::Path;

use super::warn_notification;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub async fn handle(workspace: &PromptTree, file: &Path, renderer: &ConsoleRenderer) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let coordinator = workspace.coordinator();
    let tree = coordinator.import_json(&text).await?;
    warn_notification(coordinator);

    renderer.render(presenters::present_import(
        &file.display().to_string(),
        &tree,
    ))
}
