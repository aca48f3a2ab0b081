use anyhow::Result;
use prompttree_runtime::{MutationKind, PromptTree};

use super::{prompt_count, warn_notification};
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub async fn handle_save(
    workspace: &PromptTree,
    name: &str,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let name = workspace.coordinator().save_tree(name).await?;
    renderer.render(presenters::present_mutation(
        MutationKind::SaveTree,
        name,
        None,
    ))
}

pub async fn handle_list(workspace: &PromptTree, renderer: &ConsoleRenderer) -> Result<()> {
    let saves = workspace.coordinator().refresh_saves().await?;
    renderer.render(presenters::present_save_list(&saves))
}

pub async fn handle_load(
    workspace: &PromptTree,
    name: &str,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let coordinator = workspace.coordinator();
    coordinator.load_save(name).await?;
    warn_notification(coordinator);

    renderer.render(presenters::present_mutation(
        MutationKind::LoadSave,
        name,
        prompt_count(coordinator),
    ))
}

pub async fn handle_delete(
    workspace: &PromptTree,
    name: &str,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    workspace.coordinator().delete_save(name).await?;
    renderer.render(presenters::present_mutation(
        MutationKind::DeleteSave,
        name,
        None,
    ))
}
