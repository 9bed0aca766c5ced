mod confirm;
mod navigate;
mod prompt;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, TextInput};

#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use prompt::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Create { .. } | Mode::Rename | Mode::SetFolder | Mode::Tag => {
            handle_prompt(app, key)
        }
        Mode::ConfirmDelete => handle_confirm_delete(app, key),
        Mode::ConfirmCopy => handle_confirm_copy(app, key),
    }
}

/// Apply a text-editing key to `input`. Returns true if the text changed.
fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert(c);
            true
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => {
            input.left();
            false
        }
        KeyCode::Right => {
            input.right();
            false
        }
        KeyCode::Home => {
            input.home();
            false
        }
        KeyCode::End => {
            input.end();
            false
        }
        _ => false,
    }
}

/// Leave a modal state without side effects
fn back_to_navigate(app: &mut App) {
    app.mode = Mode::Navigate;
    app.input = TextInput::default();
}
