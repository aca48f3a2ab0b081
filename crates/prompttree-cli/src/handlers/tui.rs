use anyhow::Result;
use prompttree_runtime::PromptTree;
use tokio::runtime::Runtime;

use crate::presentation::tui;

pub fn handle(workspace: &PromptTree, runtime: &Runtime) -> Result<()> {
    tracing::info!(api_url = workspace.api_url(), "starting interactive view");
    tui::run(workspace.coordinator(), runtime)
}
