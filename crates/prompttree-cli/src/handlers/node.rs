use anyhow::Result;
use prompttree_runtime::{MutationKind, PromptTree, RemoteStore};
use prompttree_types::{NodeDraft, NodeId, NodePatch, PromptId};

use super::{prompt_count, warn_notification};
use crate::args::NodeCommand;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub async fn handle(
    workspace: &PromptTree,
    command: NodeCommand,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let coordinator = workspace.coordinator();

    match command {
        NodeCommand::List { prompt } => {
            let prompt = PromptId::new(prompt);
            let nodes = coordinator.store().list_nodes(prompt).await?;
            renderer.render(presenters::present_node_list(prompt, &nodes))
        }

        NodeCommand::Create {
            prompt,
            name,
            action,
        } => {
            let prompt = PromptId::new(prompt);
            let node = coordinator
                .create_node(prompt, &NodeDraft { name, action })
                .await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_node("Node created", prompt, &node))
        }

        NodeCommand::Update {
            prompt,
            node,
            name,
            action,
        } => {
            if name.is_none() && action.is_none() {
                anyhow::bail!("Nothing to update: pass --name or --action");
            }
            let prompt = PromptId::new(prompt);
            let node = coordinator
                .update_node(prompt, NodeId::new(node), &NodePatch { name, action })
                .await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_node("Node updated", prompt, &node))
        }

        NodeCommand::Delete { prompt, node } => {
            coordinator
                .delete_node(PromptId::new(prompt), NodeId::new(node))
                .await?;
            warn_notification(coordinator);
            renderer.render(presenters::present_mutation(
                MutationKind::DeleteNode,
                format!("node #{} of prompt #{}", node, prompt),
                prompt_count(coordinator),
            ))
        }
    }
}
