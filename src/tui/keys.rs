use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means while navigating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Search,
    ToggleHelp,
    NewSnippet,
    MoveSnippetUp,
    MoveSnippetDown,
    DeleteSnippet,
    EditSnippet,
    CopySnippet,
    PasteSnippet,
    RenameSnippet,
    SetFolder,
    TagSnippet,
    NextPane,
    PreviousPane,
    Up,
    Down,
    Top,
    Bottom,
    ChangeFolder,
    Cancel,
}

/// What a key press means inside a modal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Confirm,
    Cancel,
}

/// Map a key to its navigation action.
pub fn navigate_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('/') => Action::Search,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('a') => Action::NewSnippet,
        KeyCode::Char('K') => Action::MoveSnippetUp,
        KeyCode::Char('J') => Action::MoveSnippetDown,
        KeyCode::Char('x') => Action::DeleteSnippet,
        KeyCode::Char('e') => Action::EditSnippet,
        KeyCode::Char('c') => Action::CopySnippet,
        KeyCode::Char('p') => Action::PasteSnippet,
        KeyCode::Char('r') => Action::RenameSnippet,
        KeyCode::Char('R') => Action::SetFolder,
        KeyCode::Char('t') => Action::TagSnippet,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Action::NextPane,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Action::PreviousPane,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Enter => Action::ChangeFolder,
        KeyCode::Esc => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

/// Confirm/cancel keys in a text-input mode
pub fn text_modal_action(key: KeyEvent) -> Option<ModalAction> {
    match key.code {
        KeyCode::Enter => Some(ModalAction::Confirm),
        KeyCode::Esc => Some(ModalAction::Cancel),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ModalAction::Cancel)
        }
        _ => None,
    }
}

/// Confirm/cancel keys in a yes/no prompt
pub fn confirm_modal_action(key: KeyEvent) -> Option<ModalAction> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(ModalAction::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(ModalAction::Cancel),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ModalAction::Cancel)
        }
        _ => None,
    }
}

/// One line of key help per entry: (keys, description)
pub const SHORT_HELP: &[(&str, &str)] = &[
    ("a", "new"),
    ("/", "search"),
    ("c", "copy"),
    ("x", "delete"),
    ("?", "help"),
    ("q", "quit"),
];

pub const FULL_HELP: &[(&str, &str)] = &[
    ("←/h →/l", "pane"),
    ("↑/k ↓/j", "move"),
    ("enter", "open folder"),
    ("a", "new"),
    ("e", "edit"),
    ("c", "copy"),
    ("p", "paste"),
    ("r", "rename"),
    ("R", "set folder"),
    ("t", "tag"),
    ("J/K", "reorder"),
    ("x", "delete"),
    ("/", "search"),
    ("esc", "clear filter"),
    ("?", "less help"),
    ("q", "quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_and_arrow_keys_agree() {
        assert_eq!(navigate_action(key(KeyCode::Char('l'))), Some(Action::NextPane));
        assert_eq!(navigate_action(key(KeyCode::Right)), Some(Action::NextPane));
        assert_eq!(navigate_action(key(KeyCode::Char('h'))), Some(Action::PreviousPane));
        assert_eq!(navigate_action(key(KeyCode::Char('j'))), Some(Action::Down));
        assert_eq!(navigate_action(key(KeyCode::Up)), Some(Action::Up));
    }

    #[test]
    fn shifted_letters_are_distinct() {
        let shift = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT);
        assert_eq!(navigate_action(shift('R')), Some(Action::SetFolder));
        assert_eq!(navigate_action(key(KeyCode::Char('r'))), Some(Action::RenameSnippet));
        assert_eq!(navigate_action(shift('J')), Some(Action::MoveSnippetDown));
    }

    #[test]
    fn ctrl_c_quits_but_c_copies() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(navigate_action(ctrl_c), Some(Action::Quit));
        assert_eq!(navigate_action(key(KeyCode::Char('c'))), Some(Action::CopySnippet));
        assert_eq!(navigate_action(key(KeyCode::Char('p'))), Some(Action::PasteSnippet));
    }

    #[test]
    fn text_modes_only_take_enter_and_esc() {
        assert_eq!(text_modal_action(key(KeyCode::Enter)), Some(ModalAction::Confirm));
        assert_eq!(text_modal_action(key(KeyCode::Esc)), Some(ModalAction::Cancel));
        assert_eq!(text_modal_action(key(KeyCode::Char('y'))), None);
        assert_eq!(confirm_modal_action(key(KeyCode::Char('y'))), Some(ModalAction::Confirm));
        assert_eq!(confirm_modal_action(key(KeyCode::Char('n'))), Some(ModalAction::Cancel));
    }
}
