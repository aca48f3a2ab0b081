// Engine module - client-side presentation state for prompt trees.
// Pure: no I/O, no clock. The runtime feeds snapshots in, surfaces read the
// render model out.

pub mod expand;
pub mod pagination;
pub mod render;
pub mod selection;
mod view;
pub mod window;

pub use expand::ExpandState;
pub use pagination::{PageWindow, PaginationState, advance, retreat};
pub use render::{BranchStrip, PALETTE_SIZE, PromptRow, Slot, TreeRenderModel};
pub use selection::SelectionState;
pub use view::{SnapshotChange, TreeViewState};
pub use window::{
    FALLBACK_VISIBLE, FixedWidth, MAX_VISIBLE, MIN_VISIBLE, SlotGeometry, WidthProbe,
    compute_max_visible,
};
