use prompttree_types::{Note, NoteId, PromptId};

/// Notes of the currently selected prompt.
///
/// Notes are not part of the tree snapshot; they are loaded per prompt and
/// dropped as soon as the selection moves away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesState {
    prompt: Option<PromptId>,
    notes: Vec<Note>,
    error: Option<String>,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> Option<PromptId> {
        self.prompt
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn belongs_to(&self, prompt: PromptId) -> bool {
        self.prompt == Some(prompt)
    }

    pub fn replace(&mut self, prompt: PromptId, notes: Vec<Note>) {
        self.prompt = Some(prompt);
        self.notes = notes;
        self.error = None;
    }

    /// Loading failed; keep the prompt association so a retry knows where to go
    pub fn set_error(&mut self, prompt: PromptId, message: impl Into<String>) {
        self.prompt = Some(prompt);
        self.notes.clear();
        self.error = Some(message.into());
    }

    /// Newest first, matching the server's listing order
    pub fn prepend(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
