use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::io::content::{read_content, snippet_file};
use crate::ops::snippet_ops::replace_content;
use crate::tui::app::{App, Mode, Pane, TextInput};
use crate::tui::keys::{Action, navigate_action};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let Some(action) = navigate_action(key) else {
        return;
    };

    match action {
        Action::Quit => app.should_quit = true,
        Action::Search => begin_search(app),
        Action::ToggleHelp => app.show_full_help = !app.show_full_help,
        Action::NewSnippet => {
            let folder = app.current_folder().unwrap_or_default().to_string();
            app.mode = Mode::Create { folder: None };
            app.input = TextInput::with_text(&folder);
        }
        Action::MoveSnippetUp => move_snippet(app, -1),
        Action::MoveSnippetDown => move_snippet(app, 1),
        Action::DeleteSnippet => {
            if app.selected_snippet().is_some() {
                app.mode = Mode::ConfirmDelete;
            }
        }
        Action::EditSnippet => {
            let path = app.selected_snippet().map(|s| snippet_file(app.home(), s));
            if path.is_some() {
                app.pending_edit = path;
            }
        }
        Action::CopySnippet => copy_selected(app),
        Action::PasteSnippet => paste_into_selected(app),
        Action::RenameSnippet => {
            if let Some(file) = app.selected_snippet().map(|s| s.file.clone()) {
                app.mode = Mode::Rename;
                app.input = TextInput::with_text(&file);
            }
        }
        Action::SetFolder => {
            if let Some(folder) = app.selected_snippet().map(|s| s.folder.clone()) {
                app.mode = Mode::SetFolder;
                app.input = TextInput::with_text(&folder);
            }
        }
        Action::TagSnippet => {
            if let Some(tags) = app.selected_snippet().map(|s| s.tags.join(" ")) {
                app.mode = Mode::Tag;
                app.input = TextInput::with_text(&tags);
            }
        }
        Action::NextPane => app.pane = app.pane.next(),
        Action::PreviousPane => app.pane = app.pane.prev(),
        Action::Up => move_cursor(app, -1),
        Action::Down => move_cursor(app, 1),
        Action::Top => jump(app, false),
        Action::Bottom => jump(app, true),
        Action::ChangeFolder => match app.pane {
            Pane::Folders => app.pane = Pane::Snippets,
            Pane::Snippets => app.pane = Pane::Content,
            Pane::Content => {}
        },
        Action::Cancel => clear_filter(app),
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    match app.pane {
        Pane::Folders => {
            let target = app.folder_cursor.saturating_add_signed(delta);
            app.select_folder(target);
        }
        Pane::Snippets => {
            let len = app.visible().len();
            if len == 0 {
                return;
            }
            let target = app
                .snippet_cursor()
                .saturating_add_signed(delta)
                .min(len - 1);
            app.set_snippet_cursor(target);
        }
        Pane::Content => {
            app.content_scroll = app.content_scroll.saturating_add_signed(delta);
        }
    }
}

fn jump(app: &mut App, to_end: bool) {
    match app.pane {
        Pane::Folders => {
            let target = if to_end { app.folders.len() } else { 0 };
            app.select_folder(target);
        }
        Pane::Snippets => {
            let target = if to_end { app.visible().len() } else { 0 };
            app.set_snippet_cursor(target);
            app.clamp_snippet_cursor();
        }
        // the renderer clamps to the last screenful
        Pane::Content => app.content_scroll = if to_end { usize::MAX } else { 0 },
    }
}

/// Reorder the selected snippet within its folder. Disabled while a filter
/// is active since the visible order is the ranking, not the folder order.
fn move_snippet(app: &mut App, delta: isize) {
    if app.filter.is_some() {
        app.set_error("clear the search filter to reorder");
        return;
    }
    let Some(index) = app.selected_index() else {
        return;
    };
    let Some(target) = index.checked_add_signed(delta) else {
        return;
    };
    let Some((_, list)) = app.folders.get_index_mut(app.folder_cursor) else {
        return;
    };
    if target >= list.len() {
        return;
    }
    list.swap(index, target);
    app.set_snippet_cursor(target);
}

fn copy_selected(app: &mut App) {
    let Some(snippet) = app.selected_snippet().cloned() else {
        return;
    };
    match read_content(app.home(), &snippet) {
        Ok(text) => {
            app.pending_clipboard = Some(text);
            app.copied_at = Some(Instant::now());
            app.mode = Mode::ConfirmCopy;
        }
        Err(e) => {
            let msg = format!("could not read {}: {}", snippet.path().display(), e);
            app.set_error(msg);
        }
    }
}

/// Overwrite the selected snippet's file with the clipboard text
fn paste_into_selected(app: &mut App) {
    let Some(snippet) = app.selected_snippet().cloned() else {
        return;
    };
    let Some(text) = app.clipboard_source.read_text().filter(|t| !t.is_empty()) else {
        app.set_error("clipboard is empty or unavailable");
        return;
    };
    match replace_content(app.home(), &snippet, text.as_bytes()) {
        Ok(()) => {
            app.content.invalidate();
            app.content_scroll = 0;
            app.set_info(format!("pasted into {}", snippet.path().display()));
        }
        Err(e) => app.set_error(e.to_string()),
    }
}

/// Drop a committed search filter, keeping the selected snippet selected
fn clear_filter(app: &mut App) {
    if app.filter.is_none() {
        return;
    }
    let selected = app.selected_index();
    app.filter = None;
    app.set_snippet_cursor(selected.unwrap_or(0));
}
