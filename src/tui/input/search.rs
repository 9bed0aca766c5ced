use crossterm::event::KeyEvent;

use crate::tui::app::{App, Mode, Pane, SearchSnapshot, TextInput};
use crate::tui::keys::{ModalAction, text_modal_action};

use super::*;

/// Enter Search mode, remembering what Cancel has to restore. A committed
/// query is offered again for refinement.
pub(super) fn begin_search(app: &mut App) {
    app.search_snapshot = Some(SearchSnapshot {
        filter: app.filter.clone(),
        cursor: app.snippet_cursor(),
    });
    let query = app
        .filter
        .as_ref()
        .map(|f| f.query.clone())
        .unwrap_or_default();
    app.input = TextInput::with_text(&query);
    app.mode = Mode::Search;
    app.pane = Pane::Snippets;
}

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match text_modal_action(key) {
        // Keep the filtered view as the active selection
        Some(ModalAction::Confirm) => {
            app.search_snapshot = None;
            back_to_navigate(app);
        }
        Some(ModalAction::Cancel) => {
            if let Some(snapshot) = app.search_snapshot.take() {
                app.filter = snapshot.filter;
                app.set_snippet_cursor(snapshot.cursor);
            }
            back_to_navigate(app);
        }
        None => {
            if edit_text(&mut app.input, key) {
                let query = app.input.buffer.clone();
                app.apply_filter(&query);
                app.set_snippet_cursor(0);
            }
        }
    }
}
