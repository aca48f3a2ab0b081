use std::sync::Arc;

use prompttree_types::{Prompt, PromptId, Tree};

use crate::expand::ExpandState;
use crate::pagination::{PageWindow, PaginationState};
use crate::render::TreeRenderModel;
use crate::selection::SelectionState;
use crate::window::{FALLBACK_VISIBLE, SlotGeometry, WidthProbe};

/// What changed when a snapshot replaced the previous one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotChange {
    /// True for the very first snapshot
    pub initial: bool,
    pub added: Vec<PromptId>,
    pub removed: Vec<PromptId>,
    /// Selection dropped because its prompt is gone
    pub selection_cleared: Option<PromptId>,
}

impl SnapshotChange {
    pub fn is_structural(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Client-side presentation state over the latest tree snapshot.
///
/// All per-prompt state is keyed by prompt id and revalidated whenever a
/// snapshot is applied, so lookups for vanished prompts simply fall back to
/// defaults.
#[derive(Debug, Clone)]
pub struct TreeViewState {
    snapshot: Option<Arc<Tree>>,
    expand: ExpandState,
    pagination: PaginationState,
    selection: SelectionState,
    geometry: SlotGeometry,
    max_visible: usize,
}

impl Default for TreeViewState {
    fn default() -> Self {
        Self::new(SlotGeometry::default())
    }
}

impl TreeViewState {
    pub fn new(geometry: SlotGeometry) -> Self {
        Self {
            snapshot: None,
            expand: ExpandState::new(),
            pagination: PaginationState::new(),
            selection: SelectionState::new(),
            geometry,
            max_visible: FALLBACK_VISIBLE,
        }
    }

    /// Replace the current snapshot and revalidate every id-keyed state
    pub fn apply_snapshot(&mut self, tree: Arc<Tree>) -> SnapshotChange {
        let initial = self.snapshot.is_none();
        let removed = match &self.snapshot {
            Some(previous) => previous
                .prompt_ids()
                .filter(|id| !tree.contains_prompt(*id))
                .collect(),
            None => Vec::new(),
        };

        let added = self.expand.reconcile(&tree);
        self.pagination.revalidate(&tree);
        let selection_cleared = self.selection.revalidate(&tree);
        self.snapshot = Some(tree);

        SnapshotChange {
            initial,
            added: if initial { Vec::new() } else { added },
            removed,
            selection_cleared,
        }
    }

    pub fn snapshot(&self) -> Option<&Arc<Tree>> {
        self.snapshot.as_ref()
    }

    pub fn prompt(&self, id: PromptId) -> Option<&Prompt> {
        self.snapshot.as_deref().and_then(|tree| tree.prompt(id))
    }

    /// Recompute the slot budget; call after first layout and on every resize
    pub fn remeasure<P: WidthProbe + ?Sized>(&mut self, probe: &P) -> usize {
        self.max_visible = self.geometry.max_visible(probe.available_width());
        self.max_visible
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn geometry(&self) -> SlotGeometry {
        self.geometry
    }

    pub fn is_expanded(&self, id: PromptId) -> bool {
        self.expand.is_expanded(id)
    }

    pub fn toggle(&mut self, id: PromptId) -> bool {
        self.expand.toggle(id)
    }

    /// Toggle a prompt's strip and select it, as a click on its marker does
    pub fn activate(&mut self, id: PromptId) -> bool {
        self.selection.select(id);
        self.expand.toggle(id)
    }

    pub fn expand_all(&mut self) {
        self.expand.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.expand.collapse_all();
    }

    pub fn selected(&self) -> Option<PromptId> {
        self.selection.selected()
    }

    /// Selected prompt, if it exists in the current snapshot
    pub fn selected_prompt(&self) -> Option<&Prompt> {
        self.selection.selected().and_then(|id| self.prompt(id))
    }

    pub fn select(&mut self, id: PromptId) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_next(&mut self) -> Option<PromptId> {
        match self.snapshot.as_deref() {
            Some(tree) => self.selection.select_next(tree),
            None => self.selection.selected(),
        }
    }

    pub fn select_previous(&mut self) -> Option<PromptId> {
        match self.snapshot.as_deref() {
            Some(tree) => self.selection.select_previous(tree),
            None => self.selection.selected(),
        }
    }

    /// Current page of a prompt's strip; `None` for unknown prompts
    pub fn window(&self, id: PromptId) -> Option<PageWindow> {
        let count = self.prompt(id)?.nodes.len();
        Some(self.pagination.window(id, count, self.max_visible))
    }

    pub fn page_next(&mut self, id: PromptId) -> Option<PageWindow> {
        let count = self.prompt(id)?.nodes.len();
        Some(self.pagination.advance(id, count, self.max_visible))
    }

    pub fn page_back(&mut self, id: PromptId) -> Option<PageWindow> {
        let count = self.prompt(id)?.nodes.len();
        Some(self.pagination.retreat(id, count, self.max_visible))
    }

    pub fn render(&self) -> TreeRenderModel {
        TreeRenderModel::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::FixedWidth;
    use prompttree_types::{Node, NodeId};

    fn prompt(id: i64, nodes: usize) -> Prompt {
        Prompt {
            id: PromptId::new(id),
            title: format!("Prompt {id}"),
            description: String::new(),
            nodes: (1..=nodes)
                .map(|n| Node {
                    id: NodeId::new(n as i64),
                    name: format!("step {n}"),
                    action: String::new(),
                })
                .collect(),
        }
    }

    fn tree(prompts: Vec<Prompt>) -> Arc<Tree> {
        Arc::new(Tree {
            project: "Game".into(),
            main_request: "Build a game".into(),
            prompts,
        })
    }

    #[test]
    fn test_deleting_selected_prompt_clears_selection() {
        let mut view = TreeViewState::default();
        view.apply_snapshot(tree(vec![prompt(1, 2), prompt(3, 1)]));
        view.select(PromptId::new(3));
        assert!(view.selected_prompt().is_some());

        let change = view.apply_snapshot(tree(vec![prompt(1, 2)]));

        assert_eq!(change.selection_cleared, Some(PromptId::new(3)));
        assert_eq!(change.removed, vec![PromptId::new(3)]);
        assert_eq!(view.selected(), None);
        assert!(view.selected_prompt().is_none());
    }

    #[test]
    fn test_initial_snapshot_reports_no_additions() {
        let mut view = TreeViewState::default();
        let change = view.apply_snapshot(tree(vec![prompt(1, 0), prompt(2, 0)]));
        assert!(change.initial);
        assert!(!change.is_structural());
        assert!(view.is_expanded(PromptId::new(1)));
        assert!(view.is_expanded(PromptId::new(2)));
    }

    #[test]
    fn test_refetch_revalidates_pagination() {
        let mut view = TreeViewState::default();
        view.remeasure(&FixedWidth(100.0));
        assert_eq!(view.max_visible(), 5);

        view.apply_snapshot(tree(vec![prompt(1, 12)]));
        let id = PromptId::new(1);
        view.page_next(id);
        view.page_next(id);
        assert_eq!(view.window(id).unwrap().offset, 7);

        // Nodes deleted server-side: offset is clamped into range.
        view.apply_snapshot(tree(vec![prompt(1, 3)]));
        let window = view.window(id).unwrap();
        assert_eq!(window.offset, 2);
        assert_eq!(window.visible_count(), 1);
    }

    #[test]
    fn test_activate_toggles_and_selects() {
        let mut view = TreeViewState::default();
        view.apply_snapshot(tree(vec![prompt(4, 1)]));

        let expanded = view.activate(PromptId::new(4));
        assert!(!expanded);
        assert_eq!(view.selected(), Some(PromptId::new(4)));
    }

    #[test]
    fn test_collapse_all_hides_every_strip_until_expanded_again() {
        let mut view = TreeViewState::default();
        view.apply_snapshot(tree(vec![prompt(1, 3), prompt(2, 8)]));

        view.collapse_all();
        assert!(view.render().prompts.iter().all(|row| row.branch.is_none()));

        view.expand_all();
        assert!(view.is_expanded(PromptId::new(1)));
        assert!(view.render().prompts.iter().all(|row| row.branch.is_some()));
    }

    #[test]
    fn test_unknown_prompt_has_no_window() {
        let mut view = TreeViewState::default();
        view.apply_snapshot(tree(vec![prompt(1, 1)]));
        assert!(view.window(PromptId::new(42)).is_none());
        assert!(view.page_next(PromptId::new(42)).is_none());
    }

    #[test]
    fn test_unmeasured_layout_uses_fallback_budget() {
        let mut view = TreeViewState::default();
        assert_eq!(view.max_visible(), 10);
        view.remeasure(&FixedWidth(0.0));
        assert_eq!(view.max_visible(), 10);
        view.remeasure(&|| 2000.0);
        assert_eq!(view.max_visible(), 15);
    }
}
