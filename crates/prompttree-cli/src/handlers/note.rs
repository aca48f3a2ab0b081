use anyhow::Result;
use prompttree_runtime::{MutationPhase, PromptTree};
use prompttree_types::{NoteId, PromptId};

use super::warn_notification;
use crate::args::NoteCommand;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

/// Every note command selects its prompt first, so the listing printed
/// afterwards is whatever the coordinator holds for it.
pub async fn handle(
    workspace: &PromptTree,
    command: NoteCommand,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let coordinator = workspace.coordinator();

    let prompt = match &command {
        NoteCommand::List { prompt }
        | NoteCommand::Add { prompt, .. }
        | NoteCommand::Update { prompt, .. }
        | NoteCommand::Delete { prompt, .. } => PromptId::new(*prompt),
    };
    coordinator.select_prompt(prompt).await?;

    match command {
        NoteCommand::List { .. } => {}
        NoteCommand::Add { content, .. } => {
            if !coordinator.create_note(prompt, &content).await {
                let reason = coordinator
                    .mutations()
                    .last()
                    .and_then(|record| match &record.phase {
                        MutationPhase::Failed(message) => Some(message.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| "unknown error".to_string());
                anyhow::bail!("Failed to create note: {}", reason);
            }
        }
        NoteCommand::Update { note, content, .. } => {
            coordinator
                .update_note(prompt, NoteId::new(note), &content)
                .await?;
        }
        NoteCommand::Delete { note, .. } => {
            coordinator.delete_note(prompt, NoteId::new(note)).await?;
        }
    }
    warn_notification(coordinator);

    let notes = coordinator.notes();
    renderer.render(presenters::present_note_list(prompt, notes.notes()))
}
