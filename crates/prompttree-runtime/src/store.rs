use prompttree_types::{
    Node, NodeDraft, NodeId, NodePatch, Note, NoteId, PromptDetail, PromptDraft, PromptId,
    PromptPatch, SavedTree, Tree,
};

use crate::Result;

/// Remote CRUD API holding the authoritative prompt tree.
///
/// [`crate::HttpStore`] talks to the real server; tests substitute an
/// in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn health(&self) -> Result<()>;

    async fn fetch_tree(&self) -> Result<Tree>;
    async fn export_tree(&self) -> Result<Tree>;
    async fn import_tree(&self, tree: &Tree) -> Result<()>;

    async fn save_tree(&self, name: &str) -> Result<()>;
    async fn list_saves(&self) -> Result<Vec<SavedTree>>;
    async fn load_save(&self, name: &str) -> Result<()>;
    async fn delete_save(&self, name: &str) -> Result<()>;

    async fn get_prompt(&self, id: PromptId) -> Result<PromptDetail>;
    async fn create_prompt(&self, draft: &PromptDraft) -> Result<PromptDetail>;
    async fn update_prompt(&self, id: PromptId, patch: &PromptPatch) -> Result<PromptDetail>;
    async fn delete_prompt(&self, id: PromptId) -> Result<()>;

    async fn list_nodes(&self, prompt: PromptId) -> Result<Vec<Node>>;
    async fn create_node(&self, prompt: PromptId, draft: &NodeDraft) -> Result<Node>;
    async fn update_node(&self, prompt: PromptId, node: NodeId, patch: &NodePatch)
    -> Result<Node>;
    async fn delete_node(&self, prompt: PromptId, node: NodeId) -> Result<()>;

    async fn list_notes(&self, prompt: PromptId) -> Result<Vec<Note>>;
    async fn create_note(&self, prompt: PromptId, content: &str) -> Result<Note>;
    async fn update_note(&self, prompt: PromptId, note: NoteId, content: &str) -> Result<Note>;
    async fn delete_note(&self, prompt: PromptId, note: NoteId) -> Result<()>;
}
