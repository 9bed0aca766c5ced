use std::path::Path;

use crossterm::event::KeyEvent;

use crate::ops::snippet_ops::{
    SnippetOpError, create_snippet_file, folder_name, move_to_folder, new_snippet, parse_tags,
    rename_snippet,
};
use crate::tui::app::{App, Mode, Pane, TextInput};
use crate::tui::keys::{ModalAction, text_modal_action};

use super::*;

/// Text-input modes: create, rename, set folder, tag
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match text_modal_action(key) {
        Some(ModalAction::Confirm) => confirm_prompt(app),
        Some(ModalAction::Cancel) => back_to_navigate(app),
        None => {
            edit_text(&mut app.input, key);
        }
    }
}

/// Apply the prompt. On failure the error goes to the status row and the
/// prompt stays open with its text so it can be corrected.
fn confirm_prompt(app: &mut App) {
    let result = match app.mode.clone() {
        Mode::Create { folder: None } => {
            match folder_name(&app.input.buffer) {
                Ok(folder) => {
                    app.mode = Mode::Create {
                        folder: Some(folder),
                    };
                    app.input = TextInput::default();
                }
                Err(e) => app.set_error(e.to_string()),
            }
            return;
        }
        Mode::Create {
            folder: Some(folder),
        } => create(app, &folder),
        Mode::Rename => rename(app),
        Mode::SetFolder => set_folder(app),
        Mode::Tag => {
            let tags = parse_tags(&app.input.buffer);
            if let Some(snippet) = app.selected_snippet_mut() {
                snippet.tags = tags;
            }
            app.refresh_filter();
            Ok(())
        }
        _ => Ok(()),
    };

    match result {
        Ok(()) => back_to_navigate(app),
        Err(e) => app.set_error(e.to_string()),
    }
}

fn create(app: &mut App, folder: &str) -> Result<(), SnippetOpError> {
    let snippet = new_snippet(folder, &app.input.buffer, &app.config.default_language)?;
    if app.contains_path(&snippet.folder, &snippet.file) {
        return Err(SnippetOpError::NameCollision {
            path: snippet.path(),
        });
    }
    create_snippet_file(app.home(), &snippet, b"")?;
    app.insert_front(snippet);
    app.pane = Pane::Snippets;
    Ok(())
}

fn rename(app: &mut App) -> Result<(), SnippetOpError> {
    let Some(index) = app.selected_index() else {
        return Ok(());
    };
    let Some(mut snippet) = app.folder_snippets().get(index).cloned() else {
        return Ok(());
    };
    rename_snippet(app.home(), &mut snippet, &app.input.buffer)?;
    app.replace_in_current(index, snippet);
    Ok(())
}

/// Move the selected snippet to another folder. It lands at the front of
/// that folder and stays selected.
fn set_folder(app: &mut App) -> Result<(), SnippetOpError> {
    let Some(index) = app.selected_index() else {
        return Ok(());
    };
    let Some(mut snippet) = app.folder_snippets().get(index).cloned() else {
        return Ok(());
    };
    if app.input.buffer.trim().is_empty() {
        return Err(SnippetOpError::EmptyName);
    }
    let target = folder_name(&app.input.buffer)?;
    if target == snippet.folder {
        return Ok(());
    }
    if app.contains_path(&target, &snippet.file) {
        return Err(SnippetOpError::NameCollision {
            path: Path::new(&target).join(&snippet.file),
        });
    }
    move_to_folder(app.home(), &mut snippet, &target)?;
    app.remove_from_current(index);
    app.insert_front(snippet);
    Ok(())
}
