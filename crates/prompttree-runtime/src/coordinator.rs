//! Mutation coordinator: runs remote mutations and keeps the local view
//! consistent with the server afterwards.
//!
//! Structural mutations (prompts, nodes, import, load) are followed by a
//! whole-tree refetch once the server has answered. Nothing is patched
//! optimistically, so a failed call leaves the last applied snapshot in
//! place. Notes live beside the tree and follow [`ConsistencyPolicy`].
//!
//! Calls take `&self` and never hold the state lock across an `.await`, so
//! several mutations may be in flight at once. Every tree refetch is stamped
//! when it is issued; a snapshot older than the last applied one is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prompttree_engine::{SlotGeometry, SnapshotChange, TreeRenderModel, TreeViewState};
use prompttree_types::{
    Node, NodeDraft, NodeId, NodePatch, NoteId, PromptDetail, PromptDraft, PromptId, PromptPatch,
    SavedTree, Tree, parse_import,
};

use crate::config::{ConsistencyPolicy, NoteCreateStrategy};
use crate::mutation::{MutationKind, MutationLog, MutationRecord, MutationTicket, Notification};
use crate::notes::NotesState;
use crate::store::RemoteStore;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct ClientState {
    view: TreeViewState,
    notes: NotesState,
    saves: Vec<SavedTree>,
    log: MutationLog,
    applied_stamp: u64,
    notification: Option<Notification>,
}

pub struct MutationCoordinator<S: RemoteStore> {
    store: S,
    policy: ConsistencyPolicy,
    state: Mutex<ClientState>,
    refetch_seq: AtomicU64,
}

impl<S: RemoteStore> MutationCoordinator<S> {
    pub fn new(store: S, policy: ConsistencyPolicy) -> Self {
        Self::with_geometry(store, policy, SlotGeometry::default())
    }

    pub fn with_geometry(store: S, policy: ConsistencyPolicy, geometry: SlotGeometry) -> Self {
        Self {
            store,
            policy,
            state: Mutex::new(ClientState {
                view: TreeViewState::new(geometry),
                ..ClientState::default()
            }),
            refetch_seq: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> ConsistencyPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- tree snapshot ----

    /// Fetch the tree and apply it unless a newer refetch already landed.
    ///
    /// Returns `None` when the response was discarded as stale.
    pub async fn refresh(&self) -> Result<Option<SnapshotChange>> {
        let stamp = self.refetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(stamp, "tree refetch issued");
        let tree = self.store.fetch_tree().await?;
        Ok(self.apply_fetched(stamp, tree))
    }

    fn apply_fetched(&self, stamp: u64, tree: Tree) -> Option<SnapshotChange> {
        let mut state = self.lock();
        if stamp <= state.applied_stamp {
            tracing::debug!(
                stamp,
                applied = state.applied_stamp,
                "discarding stale tree snapshot"
            );
            return None;
        }

        state.applied_stamp = stamp;
        let change = state.view.apply_snapshot(Arc::new(tree));
        if let Some(cleared) = change.selection_cleared {
            tracing::debug!(prompt = %cleared, "selected prompt vanished");
            state.notes.clear();
        }
        tracing::debug!(
            stamp,
            added = change.added.len(),
            removed = change.removed.len(),
            "tree snapshot applied"
        );
        Some(change)
    }

    async fn structural<T, F>(&self, kind: MutationKind, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let ticket = self.lock().log.begin(kind);
        tracing::info!(%kind, "mutation started");

        let value = match call.await {
            Ok(value) => value,
            Err(err) => {
                self.record_failure(ticket, kind, &err);
                return Err(err);
            }
        };

        self.lock().log.succeed(ticket);
        tracing::info!(%kind, "mutation succeeded");

        // The server already committed; a failed refetch only leaves the
        // view behind, which the user is told about.
        if let Err(err) = self.refresh().await {
            tracing::warn!(%kind, error = %err, "refetch after mutation failed");
            self.lock().notification = Some(Notification {
                kind,
                message: format!("changes saved but the tree could not be reloaded: {err}"),
            });
        }
        Ok(value)
    }

    fn record_failure(&self, ticket: MutationTicket, kind: MutationKind, err: &Error) {
        tracing::warn!(%kind, error = %err, "mutation failed");
        let mut state = self.lock();
        state.log.fail(ticket, err.to_string());
        state.notification = Some(Notification {
            kind,
            message: err.to_string(),
        });
    }

    // ---- prompts ----

    pub async fn create_prompt(&self, draft: &PromptDraft) -> Result<PromptDetail> {
        self.structural(MutationKind::CreatePrompt, self.store.create_prompt(draft))
            .await
    }

    pub async fn update_prompt(&self, id: PromptId, patch: &PromptPatch) -> Result<PromptDetail> {
        self.structural(MutationKind::UpdatePrompt, self.store.update_prompt(id, patch))
            .await
    }

    pub async fn delete_prompt(&self, id: PromptId) -> Result<()> {
        self.structural(MutationKind::DeletePrompt, self.store.delete_prompt(id))
            .await
    }

    // ---- nodes ----

    pub async fn create_node(&self, prompt: PromptId, draft: &NodeDraft) -> Result<Node> {
        self.structural(MutationKind::CreateNode, self.store.create_node(prompt, draft))
            .await
    }

    pub async fn update_node(
        &self,
        prompt: PromptId,
        node: NodeId,
        patch: &NodePatch,
    ) -> Result<Node> {
        self.structural(
            MutationKind::UpdateNode,
            self.store.update_node(prompt, node, patch),
        )
        .await
    }

    pub async fn delete_node(&self, prompt: PromptId, node: NodeId) -> Result<()> {
        self.structural(MutationKind::DeleteNode, self.store.delete_node(prompt, node))
            .await
    }

    // ---- selection and notes ----

    /// Select a prompt and load its notes when the selection changed
    pub async fn select_prompt(&self, id: PromptId) -> Result<()> {
        let needs_load = {
            let mut state = self.lock();
            let changed = state.view.selected() != Some(id);
            state.view.select(id);
            if changed {
                state.notes.clear();
            }
            changed || !state.notes.belongs_to(id)
        };

        if needs_load {
            self.load_notes(id).await
        } else {
            Ok(())
        }
    }

    /// Toggle a prompt's strip and select it
    pub async fn activate(&self, id: PromptId) -> Result<bool> {
        let expanded = self.lock().view.toggle(id);
        self.select_prompt(id).await?;
        Ok(expanded)
    }

    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.view.clear_selection();
        state.notes.clear();
    }

    /// Reload one prompt's notes; dropped if the user has moved on
    pub async fn load_notes(&self, prompt: PromptId) -> Result<()> {
        let result = self.store.list_notes(prompt).await;

        let mut state = self.lock();
        if state.view.selected() != Some(prompt) && !state.notes.belongs_to(prompt) {
            tracing::debug!(%prompt, "discarding notes for prompt no longer shown");
            return Ok(());
        }
        match result {
            Ok(notes) => {
                state.notes.replace(prompt, notes);
                Ok(())
            }
            Err(err) => {
                state.notes.set_error(prompt, err.to_string());
                Err(err)
            }
        }
    }

    /// Add a note; returns `false` instead of an error when the call fails
    pub async fn create_note(&self, prompt: PromptId, content: &str) -> bool {
        let kind = MutationKind::CreateNote;
        let ticket = self.lock().log.begin(kind);

        let note = match self.store.create_note(prompt, content).await {
            Ok(note) => note,
            Err(err) => {
                tracing::warn!(%prompt, error = %err, "note creation failed");
                self.lock().log.fail(ticket, err.to_string());
                return false;
            }
        };

        self.lock().log.succeed(ticket);
        match self.policy.note_create {
            NoteCreateStrategy::Prepend => {
                let mut state = self.lock();
                if state.notes.belongs_to(prompt) {
                    state.notes.prepend(note);
                }
            }
            NoteCreateStrategy::Refetch => {
                if let Err(err) = self.load_notes(prompt).await {
                    tracing::warn!(%prompt, error = %err, "note refetch failed");
                }
            }
        }
        true
    }

    pub async fn update_note(&self, prompt: PromptId, note: NoteId, content: &str) -> Result<()> {
        self.note_mutation(
            MutationKind::UpdateNote,
            prompt,
            self.store.update_note(prompt, note, content),
        )
        .await
    }

    pub async fn delete_note(&self, prompt: PromptId, note: NoteId) -> Result<()> {
        self.note_mutation(
            MutationKind::DeleteNote,
            prompt,
            self.store.delete_note(prompt, note),
        )
        .await
    }

    async fn note_mutation<T, F>(&self, kind: MutationKind, prompt: PromptId, call: F) -> Result<()>
    where
        F: Future<Output = Result<T>>,
    {
        let ticket = self.lock().log.begin(kind);
        if let Err(err) = call.await {
            self.record_failure(ticket, kind, &err);
            return Err(err);
        }
        self.lock().log.succeed(ticket);
        self.load_notes(prompt).await
    }

    // ---- tree manager ----

    pub async fn export(&self) -> Result<Tree> {
        self.store.export_tree().await
    }

    /// Validate and normalize an import document, then replace the tree.
    ///
    /// Malformed documents are rejected before anything is sent.
    pub async fn import_json(&self, text: &str) -> Result<Tree> {
        let tree = match parse_import(text) {
            Ok(tree) => tree,
            Err(err) => {
                let err = Error::from(err);
                tracing::warn!(error = %err, "import rejected");
                self.lock().notification = Some(Notification {
                    kind: MutationKind::ImportTree,
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        self.structural(MutationKind::ImportTree, self.store.import_tree(&tree))
            .await?;
        Ok(tree)
    }

    /// Persist the current server tree under a trimmed, non-empty name
    pub async fn save_tree(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidOperation(
                "save name must not be empty".to_string(),
            ));
        }

        let kind = MutationKind::SaveTree;
        let ticket = self.lock().log.begin(kind);
        if let Err(err) = self.store.save_tree(name).await {
            self.record_failure(ticket, kind, &err);
            return Err(err);
        }
        self.lock().log.succeed(ticket);

        self.refresh_saves().await?;
        Ok(name.to_string())
    }

    pub async fn load_save(&self, name: &str) -> Result<()> {
        self.structural(MutationKind::LoadSave, self.store.load_save(name))
            .await
    }

    pub async fn delete_save(&self, name: &str) -> Result<()> {
        let kind = MutationKind::DeleteSave;
        let ticket = self.lock().log.begin(kind);
        if let Err(err) = self.store.delete_save(name).await {
            self.record_failure(ticket, kind, &err);
            return Err(err);
        }
        self.lock().log.succeed(ticket);

        self.refresh_saves().await?;
        Ok(())
    }

    pub async fn refresh_saves(&self) -> Result<Vec<SavedTree>> {
        let saves = self.store.list_saves().await?;
        self.lock().saves = saves.clone();
        Ok(saves)
    }

    // ---- read access ----

    pub fn with_view<R>(&self, f: impl FnOnce(&TreeViewState) -> R) -> R {
        f(&self.lock().view)
    }

    /// Presentation-only changes (paging, expand, remeasure)
    pub fn with_view_mut<R>(&self, f: impl FnOnce(&mut TreeViewState) -> R) -> R {
        f(&mut self.lock().view)
    }

    pub fn render(&self) -> TreeRenderModel {
        self.lock().view.render()
    }

    pub fn snapshot(&self) -> Option<Arc<Tree>> {
        self.lock().view.snapshot().cloned()
    }

    pub fn selected(&self) -> Option<PromptId> {
        self.lock().view.selected()
    }

    pub fn notes(&self) -> NotesState {
        self.lock().notes.clone()
    }

    pub fn saves(&self) -> Vec<SavedTree> {
        self.lock().saves.clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.lock().notification.clone()
    }

    /// Acknowledge the pending notification
    pub fn take_notification(&self) -> Option<Notification> {
        self.lock().notification.take()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().log.pending_count()
    }

    pub fn mutations(&self) -> Vec<MutationRecord> {
        self.lock().log.records().cloned().collect()
    }
}

