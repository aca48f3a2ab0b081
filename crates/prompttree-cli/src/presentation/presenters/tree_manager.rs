use prompttree_types::{SavedTree, Tree};

use crate::presentation::view_models::{
    CommandResultViewModel, ExportViewModel, Guidance, ImportViewModel, SaveEntryViewModel,
    SaveListViewModel, StatusBadge, TreeSummaryViewModel,
};

fn summarize(tree: &Tree) -> TreeSummaryViewModel {
    TreeSummaryViewModel {
        project: tree.project.clone(),
        prompt_count: tree.prompts.len(),
        node_count: tree.node_count(),
    }
}

pub fn present_import(source: &str, tree: &Tree) -> CommandResultViewModel<ImportViewModel> {
    CommandResultViewModel::new(ImportViewModel {
        source: source.to_string(),
        summary: summarize(tree),
    })
    .with_badge(StatusBadge::success("Tree imported"))
    .with_suggestion(Guidance::new("View the imported tree").with_command("prompttree tree"))
}

pub fn present_export(output: &str, tree: &Tree) -> CommandResultViewModel<ExportViewModel> {
    CommandResultViewModel::new(ExportViewModel {
        output: output.to_string(),
        summary: summarize(tree),
    })
    .with_badge(StatusBadge::success("Tree exported"))
}

pub fn present_save_list(saves: &[SavedTree]) -> CommandResultViewModel<SaveListViewModel> {
    let content = SaveListViewModel {
        saves: saves
            .iter()
            .map(|save| SaveEntryViewModel {
                name: save.name.clone(),
                updated_at: save.updated_at,
            })
            .collect(),
    };

    let mut result = CommandResultViewModel::new(content);
    if saves.is_empty() {
        result = result.with_suggestion(
            Guidance::new("Save the current tree").with_command("prompttree save <NAME>"),
        );
    } else {
        result = result.with_suggestion(
            Guidance::new("Replace the tree with a save").with_command("prompttree load <NAME>"),
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompttree_types::{Prompt, PromptId};

    #[test]
    fn test_import_summary_counts_nodes() {
        let tree = Tree {
            project: "Game".into(),
            main_request: String::new(),
            prompts: vec![Prompt {
                id: PromptId::new(1),
                title: "Setup".into(),
                description: String::new(),
                nodes: vec![Default::default(), Default::default()],
            }],
        };

        let result = present_import("tree.json", &tree);

        assert_eq!(result.content.summary.prompt_count, 1);
        assert_eq!(result.content.summary.node_count, 2);
    }
}
