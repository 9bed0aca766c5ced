use crossterm::event::KeyEvent;

use crate::ops::snippet_ops::delete_snippet;
use crate::tui::app::{App, Mode};
use crate::tui::keys::{ModalAction, confirm_modal_action, text_modal_action};

use super::*;

pub(super) fn handle_confirm_delete(app: &mut App, key: KeyEvent) {
    match confirm_modal_action(key) {
        Some(ModalAction::Confirm) => {
            app.mode = Mode::Navigate;
            confirm_delete(app);
        }
        Some(ModalAction::Cancel) => app.mode = Mode::Navigate,
        None => {}
    }
}

/// Delete the selected snippet's file, then drop it from the grouped view.
/// If the file cannot be removed the entry stays.
fn confirm_delete(app: &mut App) {
    let Some(index) = app.selected_index() else {
        return;
    };
    let Some(snippet) = app.folder_snippets().get(index).cloned() else {
        return;
    };
    match delete_snippet(app.home(), &snippet) {
        Ok(()) => {
            app.remove_from_current(index);
            app.set_info(format!("deleted {}", snippet.path().display()));
        }
        Err(e) => app.set_error(e.to_string()),
    }
}

/// The copy acknowledgment reverts on its own; Confirm or Cancel end it early.
pub(super) fn handle_confirm_copy(app: &mut App, key: KeyEvent) {
    if text_modal_action(key).is_some() || confirm_modal_action(key).is_some() {
        app.copied_at = None;
        back_to_navigate(app);
    }
}
