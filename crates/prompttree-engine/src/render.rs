//! Surface-independent render model of the tree view.
//!
//! Renderers (terminal, plain text, JSON) only translate this model into
//! output; every decision about what is visible is made here.

use prompttree_types::{NodeId, PromptId};
use serde::Serialize;

use crate::pagination::PageWindow;
use crate::view::TreeViewState;

/// Number of entries in the prompt colour palette
pub const PALETTE_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRenderModel {
    pub project: String,
    pub main_request: String,
    pub max_visible: usize,
    pub selected: Option<PromptId>,
    pub prompts: Vec<PromptRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRow {
    pub id: PromptId,
    /// 1-based position in step order
    pub step: usize,
    pub title: String,
    /// Index into the colour palette
    pub color: usize,
    pub selected: bool,
    pub expanded: bool,
    pub node_count: usize,
    /// Present only for expanded prompts that have nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchStrip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStrip {
    pub window: PageWindow,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    Back,
    Node { id: NodeId, name: String },
    Next,
}

impl TreeRenderModel {
    pub(crate) fn build(view: &TreeViewState) -> Self {
        let Some(tree) = view.snapshot() else {
            return Self {
                project: String::new(),
                main_request: String::new(),
                max_visible: view.max_visible(),
                selected: view.selected(),
                prompts: Vec::new(),
            };
        };

        let prompts = tree
            .prompts
            .iter()
            .enumerate()
            .map(|(index, prompt)| {
                let expanded = view.is_expanded(prompt.id);
                let branch = if expanded && !prompt.nodes.is_empty() {
                    view.window(prompt.id).map(|window| BranchStrip {
                        slots: slots_for(&window, &prompt.nodes),
                        window,
                    })
                } else {
                    None
                };

                PromptRow {
                    id: prompt.id,
                    step: index + 1,
                    title: prompt.title.clone(),
                    color: index % PALETTE_SIZE,
                    selected: view.selected() == Some(prompt.id),
                    expanded,
                    node_count: prompt.nodes.len(),
                    branch,
                }
            })
            .collect();

        Self {
            project: tree.project.clone(),
            main_request: tree.main_request.clone(),
            max_visible: view.max_visible(),
            selected: view.selected(),
            prompts,
        }
    }

    pub fn row(&self, id: PromptId) -> Option<&PromptRow> {
        self.prompts.iter().find(|row| row.id == id)
    }
}

fn slots_for(window: &PageWindow, nodes: &[prompttree_types::Node]) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(window.slot_count());
    if window.has_back {
        slots.push(Slot::Back);
    }
    slots.extend(window.visible(nodes).iter().map(|node| Slot::Node {
        id: node.id,
        name: node.name.clone(),
    }));
    if window.has_next {
        slots.push(Slot::Next);
    }
    slots
}
