pub mod records;
pub mod result;
pub mod system;
pub mod tree;
pub mod tree_manager;

pub use records::{
    NodeEntryViewModel, NodeListViewModel, NodeViewModel, NoteEntryViewModel, NoteListViewModel,
    PromptDetailViewModel,
};
pub use result::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
pub use system::{HealthViewModel, InitViewModel, MutationViewModel};
pub use tree::TreeViewModel;
pub use tree_manager::{
    ExportViewModel, ImportViewModel, SaveEntryViewModel, SaveListViewModel, TreeSummaryViewModel,
};
