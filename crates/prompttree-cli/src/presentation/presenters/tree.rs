use prompttree_engine::TreeRenderModel;

use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, StatusBadge, TreeViewModel,
};

pub fn present_tree(
    model: TreeRenderModel,
    width: Option<u16>,
) -> CommandResultViewModel<TreeViewModel> {
    let is_empty = model.prompts.is_empty();
    let paged = model
        .prompts
        .iter()
        .filter_map(|row| row.branch.as_ref().map(|b| (row.id, b.window)))
        .find(|(_, window)| window.has_next);

    let mut result = CommandResultViewModel::new(TreeViewModel { model, width });

    if is_empty {
        result = result
            .with_badge(StatusBadge::info("Tree has no prompts"))
            .with_suggestion(
                Guidance::new("Add the first prompt")
                    .with_command("prompttree prompt create --title <TITLE>"),
            )
            .with_suggestion(
                Guidance::new("Or import an existing tree")
                    .with_command("prompttree import <FILE>"),
            );
    } else if let Some((id, _)) = paged {
        result = result.with_suggestion(
            Guidance::new("Show the next page of a strip")
                .with_command(format!("prompttree tree --page {}", id)),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompttree_engine::{FixedWidth, SlotGeometry, TreeViewState};
    use prompttree_types::{Node, NodeId, Prompt, PromptId, Tree};
    use std::sync::Arc;

    fn tree(node_count: usize) -> Arc<Tree> {
        Arc::new(Tree {
            project: "Game".into(),
            main_request: String::new(),
            prompts: vec![Prompt {
                id: PromptId::new(4),
                title: "Setup".into(),
                description: String::new(),
                nodes: (1..=node_count as i64)
                    .map(|n| Node {
                        id: NodeId::new(n),
                        name: format!("n{}", n),
                        action: String::new(),
                    })
                    .collect(),
            }],
        })
    }

    #[test]
    fn test_empty_tree_suggests_creation() {
        let mut view = TreeViewState::new(SlotGeometry::TERMINAL);
        view.apply_snapshot(Arc::new(Tree::default()));

        let result = present_tree(view.render(), None);

        assert!(result.badge.is_some());
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_overflowing_strip_suggests_paging() {
        let mut view = TreeViewState::new(SlotGeometry::TERMINAL);
        view.remeasure(&FixedWidth(46.0));
        view.apply_snapshot(tree(12));

        let result = present_tree(view.render(), Some(46));

        assert!(result.badge.is_none());
        assert_eq!(
            result.suggestions[0].command.as_deref(),
            Some("prompttree tree --page 4")
        );
    }

    #[test]
    fn test_fitting_strip_has_no_tips() {
        let mut view = TreeViewState::new(SlotGeometry::TERMINAL);
        view.remeasure(&FixedWidth(46.0));
        view.apply_snapshot(tree(3));

        let result = present_tree(view.render(), Some(46));

        assert!(result.suggestions.is_empty());
    }
}
