pub mod export;
pub mod health;
pub mod import;
pub mod init;
pub mod node;
pub mod note;
pub mod prompt;
pub mod saves;
pub mod tree;
pub mod tui;

use prompttree_runtime::{MutationCoordinator, RemoteStore};

/// Print the notification left by a mutation that otherwise succeeded,
/// e.g. a refetch that failed after the server committed.
pub(crate) fn warn_notification<S: RemoteStore>(coordinator: &MutationCoordinator<S>) {
    if let Some(notification) = coordinator.take_notification() {
        eprintln!("Warning: {}", notification);
    }
}

/// Prompt count of the tree the coordinator currently shows
pub(crate) fn prompt_count<S: RemoteStore>(coordinator: &MutationCoordinator<S>) -> Option<usize> {
    coordinator.snapshot().map(|tree| tree.prompts.len())
}
