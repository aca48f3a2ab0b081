//! Per-prompt paging through a node strip.
//!
//! Navigation arrows share the slot budget with nodes. The back arrow is
//! known up front (`offset > 0`), but whether a next arrow is needed can
//! only be decided against the tentative end of the page; once it is shown
//! it takes the last slot, so the node slice shrinks by one. Checking
//! against the tentative end guarantees that at least one real node lies
//! behind a next arrow.
//!
//! Moving forward starts the next page at the first hidden node, so no node
//! is ever skipped; moving back steps by the current page's available slots.

use std::collections::HashMap;

use prompttree_types::{PromptId, Tree};
use serde::Serialize;

/// Visible window of one strip for a given offset and slot budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub offset: usize,
    pub has_back: bool,
    /// Slots left for nodes (and a possible next arrow) after the back arrow
    pub available_slots: usize,
    pub has_next: bool,
    /// First visible node index
    pub start: usize,
    /// One past the last visible node index
    pub end: usize,
}

impl PageWindow {
    pub fn compute(node_count: usize, offset: usize, max_visible: usize) -> Self {
        let has_back = offset > 0;
        let available_slots = max_visible.saturating_sub(usize::from(has_back));
        let tentative_end = offset.saturating_add(available_slots);
        let has_next = node_count > 0 && tentative_end < node_count;
        let effective_end = if has_next {
            tentative_end - 1
        } else {
            tentative_end
        };

        let start = offset.min(node_count);
        let end = effective_end.clamp(start, node_count);

        Self {
            offset,
            has_back,
            available_slots,
            has_next,
            start,
            end,
        }
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    pub fn visible_count(&self) -> usize {
        self.end - self.start
    }

    /// Back arrow + nodes + next arrow
    pub fn slot_count(&self) -> usize {
        usize::from(self.has_back) + self.visible_count() + usize::from(self.has_next)
    }

    /// Offset of the page after this one
    pub fn advance(&self) -> usize {
        advance(self.offset, self.visible_count().max(1))
    }

    /// Offset of the page before this one
    pub fn retreat(&self) -> usize {
        retreat(self.offset, self.available_slots)
    }
}

pub fn advance(offset: usize, available_slots: usize) -> usize {
    offset.saturating_add(available_slots)
}

pub fn retreat(offset: usize, available_slots: usize) -> usize {
    offset.saturating_sub(available_slots)
}

/// Largest offset allowed for a strip of `node_count` nodes
fn clamp_offset(offset: usize, node_count: usize) -> usize {
    offset.min(node_count.max(1) - 1)
}

/// Offsets of every prompt strip, keyed by prompt id.
///
/// Prompts without an entry sit at offset zero.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    offsets: HashMap<PromptId, usize>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, id: PromptId) -> usize {
        self.offsets.get(&id).copied().unwrap_or(0)
    }

    pub fn window(&self, id: PromptId, node_count: usize, max_visible: usize) -> PageWindow {
        let offset = clamp_offset(self.offset(id), node_count);
        PageWindow::compute(node_count, offset, max_visible)
    }

    /// Move to the next page; no-op when the current page has no next arrow
    pub fn advance(&mut self, id: PromptId, node_count: usize, max_visible: usize) -> PageWindow {
        let current = self.window(id, node_count, max_visible);
        if current.has_next {
            self.set(id, current.advance(), node_count);
        }
        self.window(id, node_count, max_visible)
    }

    /// Move to the previous page; no-op on the first page
    pub fn retreat(&mut self, id: PromptId, node_count: usize, max_visible: usize) -> PageWindow {
        let current = self.window(id, node_count, max_visible);
        if current.has_back {
            self.set(id, current.retreat(), node_count);
        }
        self.window(id, node_count, max_visible)
    }

    /// Re-check every offset against a new snapshot: entries of vanished
    /// prompts are dropped and the rest are clamped to their node count.
    pub fn revalidate(&mut self, tree: &Tree) {
        let counts: HashMap<PromptId, usize> =
            tree.prompts.iter().map(|p| (p.id, p.nodes.len())).collect();

        self.offsets.retain(|id, offset| match counts.get(id) {
            Some(&count) => {
                *offset = clamp_offset(*offset, count);
                *offset > 0
            }
            None => false,
        });
    }

    fn set(&mut self, id: PromptId, offset: usize, node_count: usize) {
        let offset = clamp_offset(offset, node_count);
        if offset == 0 {
            self.offsets.remove(&id);
        } else {
            self.offsets.insert(id, offset);
        }
    }

    #[cfg(test)]
    pub(crate) fn force_offset(&mut self, id: PromptId, offset: usize) {
        self.offsets.insert(id, offset);
    }
}
