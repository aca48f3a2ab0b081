use prompttree_types::{PromptId, Tree};

/// Currently selected prompt.
///
/// `select` accepts any id; validity is only checked when a new snapshot
/// arrives, because a selection is often made just before the tree changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<PromptId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<PromptId> {
        self.selected
    }

    pub fn is_selected(&self, id: PromptId) -> bool {
        self.selected == Some(id)
    }

    pub fn select(&mut self, id: PromptId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Clear a selection that no longer exists in `tree`.
    ///
    /// Returns the id that was dropped, if any.
    pub fn revalidate(&mut self, tree: &Tree) -> Option<PromptId> {
        match self.selected {
            Some(id) if !tree.contains_prompt(id) => {
                self.selected = None;
                Some(id)
            }
            _ => None,
        }
    }

    /// Select the prompt after the current one in step order, or the first
    pub fn select_next(&mut self, tree: &Tree) -> Option<PromptId> {
        let next = match self.selected.and_then(|id| tree.position_of(id)) {
            Some(pos) => tree.prompts.get(pos + 1).or_else(|| tree.prompts.get(pos)),
            None => tree.prompts.first(),
        };
        if let Some(prompt) = next {
            self.selected = Some(prompt.id);
        }
        self.selected
    }

    /// Select the prompt before the current one in step order, or the first
    pub fn select_previous(&mut self, tree: &Tree) -> Option<PromptId> {
        let previous = match self.selected.and_then(|id| tree.position_of(id)) {
            Some(pos) => tree.prompts.get(pos.saturating_sub(1)),
            None => tree.prompts.first(),
        };
        if let Some(prompt) = previous {
            self.selected = Some(prompt.id);
        }
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompttree_types::Prompt;

    fn tree_of(ids: &[i64]) -> Tree {
        Tree {
            project: "P".into(),
            main_request: String::new(),
            prompts: ids
                .iter()
                .map(|&id| Prompt {
                    id: PromptId::new(id),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_select_is_unconditional() {
        let mut state = SelectionState::new();
        state.select(PromptId::new(99));
        assert_eq!(state.selected(), Some(PromptId::new(99)));
    }

    #[test]
    fn test_revalidate_clears_missing_selection() {
        let mut state = SelectionState::new();
        state.select(PromptId::new(3));

        let dropped = state.revalidate(&tree_of(&[1, 2]));
        assert_eq!(dropped, Some(PromptId::new(3)));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_revalidate_keeps_present_selection() {
        let mut state = SelectionState::new();
        state.select(PromptId::new(2));

        assert_eq!(state.revalidate(&tree_of(&[1, 2])), None);
        assert!(state.is_selected(PromptId::new(2)));
    }

    #[test]
    fn test_step_navigation_stops_at_edges() {
        let tree = tree_of(&[10, 20, 30]);
        let mut state = SelectionState::new();

        assert_eq!(state.select_next(&tree), Some(PromptId::new(10)));
        assert_eq!(state.select_next(&tree), Some(PromptId::new(20)));
        assert_eq!(state.select_next(&tree), Some(PromptId::new(30)));
        assert_eq!(state.select_next(&tree), Some(PromptId::new(30)));
        assert_eq!(state.select_previous(&tree), Some(PromptId::new(20)));
        assert_eq!(state.select_previous(&tree), Some(PromptId::new(10)));
        assert_eq!(state.select_previous(&tree), Some(PromptId::new(10)));
    }

    #[test]
    fn test_navigation_on_empty_tree_keeps_none() {
        let mut state = SelectionState::new();
        assert_eq!(state.select_next(&tree_of(&[])), None);
    }
}
