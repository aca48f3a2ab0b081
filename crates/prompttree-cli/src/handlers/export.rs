use anyhow::{Context, Result};
use prompttree_runtime::PromptTree;
use std::path::PathBuf;

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

/// Without `--output` the document goes to stdout as is, so it can be piped
/// straight into `prompttree import`.
pub async fn handle(
    workspace: &PromptTree,
    output: Option<PathBuf>,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let tree = workspace.coordinator().export().await?;
    let json = serde_json::to_string_pretty(&tree)?;

    let Some(path) = output else {
        println!("{}", json);
        return Ok(());
    };

    std::fs::write(&path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    renderer.render(presenters::present_export(
        &path.display().to_string(),
        &tree,
    ))
}
