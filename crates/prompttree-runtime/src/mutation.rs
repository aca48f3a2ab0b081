use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

/// Oldest entries are dropped once the log holds this many mutations
pub const MUTATION_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    CreatePrompt,
    UpdatePrompt,
    DeletePrompt,
    CreateNode,
    UpdateNode,
    DeleteNode,
    CreateNote,
    UpdateNote,
    DeleteNote,
    ImportTree,
    LoadSave,
    SaveTree,
    DeleteSave,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::CreatePrompt => "create prompt",
            MutationKind::UpdatePrompt => "update prompt",
            MutationKind::DeletePrompt => "delete prompt",
            MutationKind::CreateNode => "create node",
            MutationKind::UpdateNode => "update node",
            MutationKind::DeleteNode => "delete node",
            MutationKind::CreateNote => "create note",
            MutationKind::UpdateNote => "update note",
            MutationKind::DeleteNote => "delete note",
            MutationKind::ImportTree => "import tree",
            MutationKind::LoadSave => "load save",
            MutationKind::SaveTree => "save tree",
            MutationKind::DeleteSave => "delete save",
        }
    }

    /// Whether success invalidates the tree snapshot
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MutationKind::CreatePrompt
                | MutationKind::UpdatePrompt
                | MutationKind::DeletePrompt
                | MutationKind::CreateNode
                | MutationKind::UpdateNode
                | MutationKind::DeleteNode
                | MutationKind::ImportTree
                | MutationKind::LoadSave
        )
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl MutationPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, MutationPhase::Succeeded | MutationPhase::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MutationTicket(u64);

impl MutationTicket {
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationRecord {
    pub ticket: MutationTicket,
    pub kind: MutationKind,
    pub phase: MutationPhase,
}

/// Recent mutations with their lifecycle phase.
///
/// Mutations are independent: there is no queue, a ticket only identifies
/// which record to move forward when the remote call returns.
#[derive(Debug, Clone, Default)]
pub struct MutationLog {
    next_ticket: u64,
    records: VecDeque<MutationRecord>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, kind: MutationKind) -> MutationTicket {
        self.next_ticket += 1;
        let ticket = MutationTicket(self.next_ticket);

        if self.records.len() == MUTATION_LOG_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(MutationRecord {
            ticket,
            kind,
            phase: MutationPhase::Pending,
        });
        ticket
    }

    pub fn succeed(&mut self, ticket: MutationTicket) {
        self.finish(ticket, MutationPhase::Succeeded);
    }

    pub fn fail(&mut self, ticket: MutationTicket, message: impl Into<String>) {
        self.finish(ticket, MutationPhase::Failed(message.into()));
    }

    fn finish(&mut self, ticket: MutationTicket, phase: MutationPhase) {
        if let Some(record) = self.records.iter_mut().find(|r| r.ticket == ticket) {
            record.phase = phase;
        }
    }

    /// Phase of a ticket; tickets evicted from the log report `Idle`
    pub fn phase(&self, ticket: MutationTicket) -> MutationPhase {
        self.records
            .iter()
            .find(|r| r.ticket == ticket)
            .map(|r| r.phase.clone())
            .unwrap_or(MutationPhase::Idle)
    }

    pub fn pending_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.phase == MutationPhase::Pending)
            .count()
    }

    pub fn last_failure(&self) -> Option<&MutationRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| matches!(r.phase, MutationPhase::Failed(_)))
    }

    pub fn records(&self) -> impl Iterator<Item = &MutationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A failure the user has to acknowledge before continuing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: MutationKind,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.kind.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_lifecycle() {
        let mut log = MutationLog::new();
        let a = log.begin(MutationKind::DeletePrompt);
        let b = log.begin(MutationKind::CreateNote);

        assert_eq!(log.phase(a), MutationPhase::Pending);
        assert_eq!(log.pending_count(), 2);

        log.succeed(b);
        log.fail(a, "boom");

        assert_eq!(log.phase(b), MutationPhase::Succeeded);
        assert_eq!(log.phase(a), MutationPhase::Failed("boom".into()));
        assert_eq!(log.pending_count(), 0);
        assert_eq!(log.last_failure().map(|r| r.ticket), Some(a));
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = MutationLog::new();
        let first = log.begin(MutationKind::SaveTree);
        for _ in 0..MUTATION_LOG_CAPACITY {
            log.begin(MutationKind::SaveTree);
        }

        assert_eq!(log.len(), MUTATION_LOG_CAPACITY);
        assert_eq!(log.phase(first), MutationPhase::Idle);
    }

    #[test]
    fn test_structural_kinds() {
        assert!(MutationKind::DeleteNode.is_structural());
        assert!(MutationKind::ImportTree.is_structural());
        assert!(!MutationKind::CreateNote.is_structural());
        assert!(!MutationKind::SaveTree.is_structural());
    }

    #[test]
    fn test_notification_message() {
        let n = Notification {
            kind: MutationKind::UpdateNode,
            message: "title is required".into(),
        };
        assert_eq!(n.to_string(), "Failed to update node: title is required");
    }
}
