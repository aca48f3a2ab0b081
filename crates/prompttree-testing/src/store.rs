//! In-memory [`RemoteStore`] that behaves like the tree server.
//!
//! Every call is recorded so tests can assert which requests a coordinator
//! made, and failures or slow tree fetches can be injected on demand.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use prompttree_runtime::{Error, RemoteStore, Result};
use prompttree_types::{
    Node, NodeDraft, NodeId, NodePatch, Note, NoteId, Prompt, PromptDetail, PromptDraft,
    PromptId, PromptPatch, SavedTree, Tree,
};
use tokio::sync::oneshot;

/// One request received by a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    FetchTree,
    ExportTree,
    ImportTree,
    SaveTree(String),
    ListSaves,
    LoadSave(String),
    DeleteSave(String),
    GetPrompt(PromptId),
    CreatePrompt,
    UpdatePrompt(PromptId),
    DeletePrompt(PromptId),
    ListNodes(PromptId),
    CreateNode(PromptId),
    UpdateNode(PromptId, NodeId),
    DeleteNode(PromptId, NodeId),
    ListNotes(PromptId),
    CreateNote(PromptId),
    UpdateNote(PromptId, NoteId),
    DeleteNote(PromptId, NoteId),
}

#[derive(Default)]
struct Inner {
    tree: Tree,
    notes: HashMap<PromptId, Vec<Note>>,
    saves: BTreeMap<String, (Tree, DateTime<Utc>)>,
    last_id: i64,
    calls: Vec<Call>,
    failures: VecDeque<(u16, String)>,
    fetch_failures: VecDeque<(u16, String)>,
    fetch_gates: VecDeque<oneshot::Receiver<()>>,
}

impl Inner {
    fn record(&mut self, call: Call) -> Result<()> {
        self.calls.push(call);
        match self.failures.pop_front() {
            Some((status, message)) => Err(Error::Server { status, message }),
            None => Ok(()),
        }
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Keep generated ids above everything already in the tree
    fn bump_ids(&mut self) {
        let highest = self
            .tree
            .prompts
            .iter()
            .flat_map(|p| std::iter::once(p.id.get()).chain(p.nodes.iter().map(|n| n.id.get())))
            .chain(self.notes.values().flatten().map(|n| n.id.get()))
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(highest);
    }

    fn prompt_mut(&mut self, id: PromptId) -> Result<&mut Prompt> {
        self.tree
            .prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("prompt {} not found", id)))
    }

    fn detail(&self, prompt: &Prompt) -> PromptDetail {
        PromptDetail {
            id: prompt.id,
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            project_name: self.tree.project.clone(),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(tree: Tree) -> Self {
        let store = Self::new();
        store.set_tree(tree);
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the server-side tree without recording a call
    pub fn set_tree(&self, tree: Tree) {
        let mut inner = self.lock();
        inner.tree = tree;
        inner.bump_ids();
    }

    pub fn tree(&self) -> Tree {
        self.lock().tree.clone()
    }

    pub fn set_notes(&self, prompt: PromptId, notes: Vec<Note>) {
        let mut inner = self.lock();
        inner.notes.insert(prompt, notes);
        inner.bump_ids();
    }

    pub fn notes(&self, prompt: PromptId) -> Vec<Note> {
        self.lock().notes.get(&prompt).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn fetch_count(&self) -> usize {
        self.count(|c| *c == Call::FetchTree)
    }

    /// Make the next call, whatever it is, fail with a server error
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.lock().failures.push_back((status, message.into()));
    }

    /// Make the next tree fetch fail, leaving other calls alone
    pub fn fail_next_fetch(&self, status: u16, message: impl Into<String>) {
        self.lock().fetch_failures.push_back((status, message.into()));
    }

    /// Hold the next tree fetch until the returned sender fires.
    ///
    /// The tree is captured when the fetch arrives, so the delayed response
    /// carries the state from before any later mutation.
    pub fn pause_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().fetch_gates.push_back(rx);
        tx
    }
}

impl RemoteStore for MemoryStore {
    async fn health(&self) -> Result<()> {
        self.lock().record(Call::Health)
    }

    async fn fetch_tree(&self) -> Result<Tree> {
        let (tree, gate) = {
            let mut inner = self.lock();
            inner.record(Call::FetchTree)?;
            if let Some((status, message)) = inner.fetch_failures.pop_front() {
                return Err(Error::Server { status, message });
            }
            (inner.tree.clone(), inner.fetch_gates.pop_front())
        };
        if let Some(gate) = gate {
            // A dropped sender releases the fetch as well.
            let _ = gate.await;
        }
        Ok(tree)
    }

    async fn export_tree(&self) -> Result<Tree> {
        let mut inner = self.lock();
        inner.record(Call::ExportTree)?;
        Ok(inner.tree.clone())
    }

    async fn import_tree(&self, tree: &Tree) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::ImportTree)?;
        inner.tree = tree.clone();
        inner.notes.clear();
        inner.bump_ids();
        Ok(())
    }

    async fn save_tree(&self, name: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::SaveTree(name.to_string()))?;
        let snapshot = inner.tree.clone();
        inner.saves.insert(name.to_string(), (snapshot, Utc::now()));
        Ok(())
    }

    async fn list_saves(&self) -> Result<Vec<SavedTree>> {
        let mut inner = self.lock();
        inner.record(Call::ListSaves)?;
        let mut saves: Vec<SavedTree> = inner
            .saves
            .iter()
            .map(|(name, (_, updated_at))| SavedTree {
                name: name.clone(),
                updated_at: *updated_at,
            })
            .collect();
        saves.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(saves)
    }

    async fn load_save(&self, name: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::LoadSave(name.to_string()))?;
        let tree = inner
            .saves
            .get(name)
            .map(|(tree, _)| tree.clone())
            .ok_or_else(|| Error::NotFound(format!("save '{}' not found", name)))?;
        inner.tree = tree;
        Ok(())
    }

    async fn delete_save(&self, name: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::DeleteSave(name.to_string()))?;
        inner
            .saves
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("save '{}' not found", name)))
    }

    async fn get_prompt(&self, id: PromptId) -> Result<PromptDetail> {
        let mut inner = self.lock();
        inner.record(Call::GetPrompt(id))?;
        let prompt = inner
            .tree
            .prompt(id)
            .ok_or_else(|| Error::NotFound(format!("prompt {} not found", id)))?;
        Ok(inner.detail(prompt))
    }

    async fn create_prompt(&self, draft: &PromptDraft) -> Result<PromptDetail> {
        let mut inner = self.lock();
        inner.record(Call::CreatePrompt)?;
        if draft.title.trim().is_empty() {
            return Err(Error::Server {
                status: 422,
                message: "title is required".to_string(),
            });
        }
        let prompt = Prompt {
            id: PromptId::new(inner.next_id()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            nodes: Vec::new(),
        };
        let detail = inner.detail(&prompt);
        inner.tree.prompts.push(prompt);
        Ok(detail)
    }

    async fn update_prompt(&self, id: PromptId, patch: &PromptPatch) -> Result<PromptDetail> {
        let mut inner = self.lock();
        inner.record(Call::UpdatePrompt(id))?;
        let prompt = inner.prompt_mut(id)?;
        if let Some(title) = &patch.title {
            prompt.title = title.clone();
        }
        if let Some(description) = &patch.description {
            prompt.description = description.clone();
        }
        let prompt = prompt.clone();
        Ok(inner.detail(&prompt))
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::DeletePrompt(id))?;
        let before = inner.tree.prompts.len();
        inner.tree.prompts.retain(|p| p.id != id);
        if inner.tree.prompts.len() == before {
            return Err(Error::NotFound(format!("prompt {} not found", id)));
        }
        inner.notes.remove(&id);
        Ok(())
    }

    async fn list_nodes(&self, prompt: PromptId) -> Result<Vec<Node>> {
        let mut inner = self.lock();
        inner.record(Call::ListNodes(prompt))?;
        Ok(inner.prompt_mut(prompt)?.nodes.clone())
    }

    async fn create_node(&self, prompt: PromptId, draft: &NodeDraft) -> Result<Node> {
        let mut inner = self.lock();
        inner.record(Call::CreateNode(prompt))?;
        let node = Node {
            id: NodeId::new(inner.next_id()),
            name: draft.name.clone(),
            action: draft.action.clone(),
        };
        inner.prompt_mut(prompt)?.nodes.push(node.clone());
        Ok(node)
    }

    async fn update_node(&self, prompt: PromptId, node: NodeId, patch: &NodePatch) -> Result<Node> {
        let mut inner = self.lock();
        inner.record(Call::UpdateNode(prompt, node))?;
        let target = inner
            .prompt_mut(prompt)?
            .nodes
            .iter_mut()
            .find(|n| n.id == node)
            .ok_or_else(|| Error::NotFound(format!("node {} not found", node)))?;
        if let Some(name) = &patch.name {
            target.name = name.clone();
        }
        if let Some(action) = &patch.action {
            target.action = action.clone();
        }
        Ok(target.clone())
    }

    async fn delete_node(&self, prompt: PromptId, node: NodeId) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::DeleteNode(prompt, node))?;
        let nodes = &mut inner.prompt_mut(prompt)?.nodes;
        let before = nodes.len();
        nodes.retain(|n| n.id != node);
        if nodes.len() == before {
            return Err(Error::NotFound(format!("node {} not found", node)));
        }
        Ok(())
    }

    async fn list_notes(&self, prompt: PromptId) -> Result<Vec<Note>> {
        let mut inner = self.lock();
        inner.record(Call::ListNotes(prompt))?;
        Ok(inner.notes.get(&prompt).cloned().unwrap_or_default())
    }

    async fn create_note(&self, prompt: PromptId, content: &str) -> Result<Note> {
        let mut inner = self.lock();
        inner.record(Call::CreateNote(prompt))?;
        inner.prompt_mut(prompt)?;
        let note = Note {
            id: NoteId::new(inner.next_id()),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        inner.notes.entry(prompt).or_default().insert(0, note.clone());
        Ok(note)
    }

    async fn update_note(&self, prompt: PromptId, note: NoteId, content: &str) -> Result<Note> {
        let mut inner = self.lock();
        inner.record(Call::UpdateNote(prompt, note))?;
        let target = inner
            .notes
            .get_mut(&prompt)
            .and_then(|notes| notes.iter_mut().find(|n| n.id == note))
            .ok_or_else(|| Error::NotFound(format!("note {} not found", note)))?;
        target.content = content.to_string();
        Ok(target.clone())
    }

    async fn delete_note(&self, prompt: PromptId, note: NoteId) -> Result<()> {
        let mut inner = self.lock();
        inner.record(Call::DeleteNote(prompt, note))?;
        let notes = inner.notes.entry(prompt).or_default();
        let before = notes.len();
        notes.retain(|n| n.id != note);
        if notes.len() == before {
            return Err(Error::NotFound(format!("note {} not found", note)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_created_ids_do_not_collide_with_seeded_tree() {
        let store = MemoryStore::with_tree(fixtures::sample_tree());
        let detail = store
            .create_prompt(&PromptDraft {
                title: "New".into(),
                description: String::new(),
            })
            .await
            .unwrap();

        let existing: Vec<i64> = fixtures::sample_tree()
            .prompts
            .iter()
            .flat_map(|p| std::iter::once(p.id.get()).chain(p.nodes.iter().map(|n| n.id.get())))
            .collect();
        assert!(!existing.contains(&detail.id.get()));
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let store = MemoryStore::with_tree(fixtures::sample_tree());
        store.fail_next(500, "boom");

        assert!(store.delete_prompt(PromptId::new(1)).await.is_err());
        assert!(store.delete_prompt(PromptId::new(1)).await.is_ok());
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_other_calls() {
        let store = MemoryStore::with_tree(fixtures::sample_tree());
        store.fail_next_fetch(503, "unavailable");

        assert!(store.delete_prompt(PromptId::new(1)).await.is_ok());
        assert!(store.fetch_tree().await.is_err());
        assert!(store.fetch_tree().await.is_ok());
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_notes_are_listed_newest_first() {
        let store = MemoryStore::with_tree(fixtures::sample_tree());
        store.create_note(PromptId::new(1), "first").await.unwrap();
        store.create_note(PromptId::new(1), "second").await.unwrap();

        let notes = store.list_notes(PromptId::new(1)).await.unwrap();
        assert_eq!(notes[0].content, "second");
        assert_eq!(notes[1].content, "first");
    }
}
