use prompttree_types::PromptId;

/// Actions produced by key presses.
///
/// Cursor and input-buffer changes never leave [`super::app::AppState`];
/// everything here touches the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TuiEvent {
    Quit,
    MoveUp,
    MoveDown,
    Activate,
    ExpandAll,
    CollapseAll,
    PageBack,
    PageNext,
    Refresh,
    SubmitNote(String),
    DeletePrompt(PromptId),
    DismissNotification,
}
