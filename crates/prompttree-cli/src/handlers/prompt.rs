use anyhow::Result;
use prompttree_runtime::{MutationKind, PromptTree, RemoteStore};
use prompttree_types::{PromptDraft, PromptId, PromptPatch};

use super::{prompt_count, warn_notification};
use crate::args::PromptCommand;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub async fn handle(
    workspace: &PromptTree,
    command: PromptCommand,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let coordinator = workspace.coordinator();

    match command {
        PromptCommand::Show { id } => {
            let id = PromptId::new(id);
            let store = coordinator.store();
            let (detail, nodes) = tokio::try_join!(store.get_prompt(id), store.list_nodes(id))?;
            renderer.render(presenters::present_prompt_detail(detail, &nodes))
        }

        PromptCommand::Create { title, description } => {
            let detail = coordinator
                .create_prompt(&PromptDraft { title, description })
                .await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_mutation(
                MutationKind::CreatePrompt,
                format!("#{} {}", detail.id, detail.title),
                prompt_count(coordinator),
            ))
        }

        PromptCommand::Update {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                anyhow::bail!("Nothing to update: pass --title or --description");
            }
            let detail = coordinator
                .update_prompt(PromptId::new(id), &PromptPatch { title, description })
                .await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_mutation(
                MutationKind::UpdatePrompt,
                format!("#{} {}", detail.id, detail.title),
                prompt_count(coordinator),
            ))
        }

        PromptCommand::Delete { id } => {
            coordinator.delete_prompt(PromptId::new(id)).await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_mutation(
                MutationKind::DeletePrompt,
                format!("#{}", id),
                prompt_count(coordinator),
            ))
        }
    }
}
