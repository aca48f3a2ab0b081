use prompttree_types::{Node, Note, PromptDetail, PromptId};

use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, NodeEntryViewModel, NodeListViewModel, NodeViewModel,
    NoteEntryViewModel, NoteListViewModel, PromptDetailViewModel, StatusBadge,
};

fn node_entry(node: &Node) -> NodeEntryViewModel {
    NodeEntryViewModel {
        id: node.id.get(),
        name: node.name.clone(),
        action: node.action.clone(),
    }
}

/// `nodes` come from the tree snapshot; the prompt endpoint does not list them
pub fn present_prompt_detail(
    detail: PromptDetail,
    nodes: &[Node],
) -> CommandResultViewModel<PromptDetailViewModel> {
    let id = detail.id;
    let content = PromptDetailViewModel {
        id: id.get(),
        title: detail.title,
        description: detail.description,
        project_name: detail.project_name,
        nodes: nodes.iter().map(node_entry).collect(),
    };

    CommandResultViewModel::new(content).with_suggestion(
        Guidance::new("Show the prompt's notes").with_command(format!("prompttree note list {}", id)),
    )
}

pub fn present_node_list(
    prompt: PromptId,
    nodes: &[Node],
) -> CommandResultViewModel<NodeListViewModel> {
    let mut result = CommandResultViewModel::new(NodeListViewModel {
        prompt_id: prompt.get(),
        nodes: nodes.iter().map(node_entry).collect(),
    });

    if nodes.is_empty() {
        result = result.with_suggestion(
            Guidance::new("Add a node")
                .with_command(format!("prompttree node create {} --name <NAME>", prompt)),
        );
    }
    result
}

pub fn present_node(
    label: &str,
    prompt: PromptId,
    node: &Node,
) -> CommandResultViewModel<NodeViewModel> {
    CommandResultViewModel::new(NodeViewModel {
        prompt_id: prompt.get(),
        node: node_entry(node),
    })
    .with_badge(StatusBadge::success(label))
}

pub fn present_note_list(
    prompt: PromptId,
    notes: &[Note],
) -> CommandResultViewModel<NoteListViewModel> {
    let content = NoteListViewModel {
        prompt_id: prompt.get(),
        notes: notes
            .iter()
            .map(|note| NoteEntryViewModel {
                id: note.id.get(),
                content: note.content.clone(),
                created_at: note.created_at,
            })
            .collect(),
    };

    CommandResultViewModel::new(content)
}
