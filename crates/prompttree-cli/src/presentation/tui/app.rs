use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use prompttree_types::PromptId;

use super::tui_event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum InputMode {
    #[default]
    Browse,
    /// Typing a note for the selected prompt
    Note(String),
    ConfirmDelete(PromptId),
}

#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub mode: InputMode,
    pub should_quit: bool,
    /// Strip width the view was last measured for
    pub strip_width: Option<u16>,
    /// Local message shown when there is no coordinator notification
    pub message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent, selected: Option<PromptId>) -> Option<TuiEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(TuiEvent::Quit);
        }

        match std::mem::take(&mut self.mode) {
            InputMode::Browse => self.browse_key(key.code, selected),
            InputMode::Note(mut buffer) => match key.code {
                KeyCode::Esc => None,
                KeyCode::Enter => {
                    let content = buffer.trim().to_string();
                    (!content.is_empty()).then_some(TuiEvent::SubmitNote(content))
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    self.mode = InputMode::Note(buffer);
                    None
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    self.mode = InputMode::Note(buffer);
                    None
                }
                _ => {
                    self.mode = InputMode::Note(buffer);
                    None
                }
            },
            InputMode::ConfirmDelete(id) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(TuiEvent::DeletePrompt(id)),
                _ => None,
            },
        }
    }

    fn browse_key(&mut self, code: KeyCode, selected: Option<PromptId>) -> Option<TuiEvent> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(TuiEvent::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(TuiEvent::MoveDown),
            KeyCode::Up | KeyCode::Char('k') => Some(TuiEvent::MoveUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(TuiEvent::Activate),
            KeyCode::Left | KeyCode::Char('h') => Some(TuiEvent::PageBack),
            KeyCode::Right | KeyCode::Char('l') => Some(TuiEvent::PageNext),
            KeyCode::Char('E') => Some(TuiEvent::ExpandAll),
            KeyCode::Char('C') => Some(TuiEvent::CollapseAll),
            KeyCode::Char('r') => Some(TuiEvent::Refresh),
            KeyCode::Char('x') => Some(TuiEvent::DismissNotification),
            KeyCode::Char('n') => {
                match selected {
                    Some(_) => self.mode = InputMode::Note(String::new()),
                    None => self.message = Some("Select a prompt first".to_string()),
                }
                None
            }
            KeyCode::Char('d') => {
                if let Some(id) = selected {
                    self.mode = InputMode::ConfirmDelete(id);
                }
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_note_input_collects_text_until_enter() {
        let mut app = AppState::new();
        let selected = Some(PromptId::new(1));

        assert_eq!(app.handle_key(press(KeyCode::Char('n')), selected), None);
        for c in "hi!".chars() {
            app.handle_key(press(KeyCode::Char(c)), selected);
        }
        app.handle_key(press(KeyCode::Backspace), selected);

        assert_eq!(
            app.handle_key(press(KeyCode::Enter), selected),
            Some(TuiEvent::SubmitNote("hi".to_string()))
        );
        assert_eq!(app.mode, InputMode::Browse);
    }

    #[test]
    fn test_capital_e_and_c_toggle_every_strip() {
        let mut app = AppState::new();

        assert_eq!(
            app.handle_key(press(KeyCode::Char('E')), None),
            Some(TuiEvent::ExpandAll)
        );
        assert_eq!(
            app.handle_key(press(KeyCode::Char('C')), None),
            Some(TuiEvent::CollapseAll)
        );
        assert_eq!(app.mode, InputMode::Browse);
    }

    #[test]
    fn test_blank_note_is_not_submitted() {
        let mut app = AppState::new();
        app.mode = InputMode::Note("   ".to_string());

        assert_eq!(app.handle_key(press(KeyCode::Enter), None), None);
    }

    #[test]
    fn test_q_while_typing_is_text() {
        let mut app = AppState::new();
        app.mode = InputMode::Note(String::new());

        assert_eq!(app.handle_key(press(KeyCode::Char('q')), None), None);
        assert_eq!(app.mode, InputMode::Note("q".to_string()));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = AppState::new();
        let selected = Some(PromptId::new(7));

        assert_eq!(app.handle_key(press(KeyCode::Char('d')), selected), None);
        assert_eq!(
            app.handle_key(press(KeyCode::Char('y')), selected),
            Some(TuiEvent::DeletePrompt(PromptId::new(7)))
        );

        app.handle_key(press(KeyCode::Char('d')), selected);
        assert_eq!(app.handle_key(press(KeyCode::Char('n')), selected), None);
        assert_eq!(app.mode, InputMode::Browse);
    }

    #[test]
    fn test_note_without_selection_sets_message() {
        let mut app = AppState::new();

        app.handle_key(press(KeyCode::Char('n')), None);

        assert_eq!(app.mode, InputMode::Browse);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut app = AppState::new();
        app.mode = InputMode::Note("draft".to_string());

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(key, None), Some(TuiEvent::Quit));
    }
}
