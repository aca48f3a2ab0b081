pub mod records;
pub mod system;
pub mod tree;
pub mod tree_manager;

pub use records::{NodeListView, NodeView, NoteListView, PromptDetailView};
pub use system::{HealthView, InitView, MutationView};
pub use tree::TreeView;
pub use tree_manager::{ExportView, ImportView, SaveListView};
