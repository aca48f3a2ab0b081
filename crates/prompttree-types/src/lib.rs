pub mod error;
mod ids;
pub mod import;
pub mod requests;
mod tree;

pub use error::{ImportError, Result};
pub use ids::{NodeId, NoteId, PromptId};
pub use import::{normalize_import, parse_import};
pub use requests::{
    ImportTreeRequest, NodeDraft, NodePatch, NoteBody, PromptDraft, PromptPatch, SaveTreeRequest,
    SavedTreeList, server_error_message,
};
pub use tree::{Node, Note, Prompt, PromptDetail, SavedTree, Tree};
