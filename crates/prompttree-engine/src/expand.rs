use std::collections::HashSet;

use prompttree_types::{PromptId, Tree};

/// Which prompts show their node strip.
///
/// Every prompt starts expanded the first time it is seen. Prompts that
/// survive a refetch keep whatever state the user gave them; prompts that
/// disappear are forgotten.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    known: HashSet<PromptId>,
    expanded: HashSet<PromptId>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align with a new snapshot; returns the ids seen for the first time
    pub fn reconcile(&mut self, tree: &Tree) -> Vec<PromptId> {
        let current: HashSet<PromptId> = tree.prompt_ids().collect();

        let added: Vec<PromptId> = tree
            .prompt_ids()
            .filter(|id| !self.known.contains(id))
            .collect();
        self.expanded.extend(added.iter().copied());
        self.expanded.retain(|id| current.contains(id));
        self.known = current;

        added
    }

    pub fn is_expanded(&self, id: PromptId) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip membership; returns the new state
    pub fn toggle(&mut self, id: PromptId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.known.clone();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
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
    fn test_first_snapshot_expands_everything() {
        let mut state = ExpandState::new();
        let added = state.reconcile(&tree_of(&[1, 2, 3]));

        assert_eq!(added.len(), 3);
        for id in [1, 2, 3] {
            assert!(state.is_expanded(PromptId::new(id)));
        }
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut state = ExpandState::new();
        state.reconcile(&tree_of(&[1, 2]));

        let id = PromptId::new(2);
        let before = state.is_expanded(id);
        state.toggle(id);
        assert_ne!(state.is_expanded(id), before);
        state.toggle(id);
        assert_eq!(state.is_expanded(id), before);
    }

    #[test]
    fn test_refetch_keeps_existing_state_and_expands_newcomers() {
        let mut state = ExpandState::new();
        state.reconcile(&tree_of(&[1, 2]));
        state.toggle(PromptId::new(1));

        let added = state.reconcile(&tree_of(&[1, 2, 5]));

        assert_eq!(added, vec![PromptId::new(5)]);
        assert!(!state.is_expanded(PromptId::new(1)));
        assert!(state.is_expanded(PromptId::new(2)));
        assert!(state.is_expanded(PromptId::new(5)));
    }

    #[test]
    fn test_vanished_prompt_is_forgotten() {
        let mut state = ExpandState::new();
        state.reconcile(&tree_of(&[1, 2]));
        state.toggle(PromptId::new(2));

        state.reconcile(&tree_of(&[1]));
        assert!(!state.is_expanded(PromptId::new(2)));

        // Coming back counts as a new prompt.
        state.reconcile(&tree_of(&[1, 2]));
        assert!(state.is_expanded(PromptId::new(2)));
    }

    #[test]
    fn test_empty_prompt_can_be_expanded() {
        let mut state = ExpandState::new();
        state.reconcile(&tree_of(&[7]));
        assert!(state.is_expanded(PromptId::new(7)));
        assert_eq!(state.expanded_count(), 1);
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let mut state = ExpandState::new();
        state.reconcile(&tree_of(&[1, 2, 3]));
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
        state.expand_all();
        assert_eq!(state.expanded_count(), 3);
    }
}
