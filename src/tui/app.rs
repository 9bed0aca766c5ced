use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use indexmap::IndexMap;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::content::ContentCache;
use crate::io::state::{SessionState, read_session_state, write_session_state};
use crate::model::config::Config;
use crate::model::snippet::Snippet;
use crate::ops::fuzzy;
use crate::ops::library::save_library;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::clipboard::{self, ClipboardSource, SystemClipboard};
use super::input;
use super::render;
use super::render::list_item::ListItem;
use super::theme::Theme;

/// How long the "copied" acknowledgment stays up
pub const COPY_ACK: Duration = Duration::from_secs(1);

/// Event loop poll interval
const TICK: Duration = Duration::from_millis(250);

/// The three columns of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Folders,
    Snippets,
    Content,
}

impl Pane {
    pub fn next(self) -> Pane {
        match self {
            Pane::Folders => Pane::Snippets,
            Pane::Snippets => Pane::Content,
            Pane::Content => Pane::Folders,
        }
    }

    pub fn prev(self) -> Pane {
        match self {
            Pane::Folders => Pane::Content,
            Pane::Snippets => Pane::Folders,
            Pane::Content => Pane::Snippets,
        }
    }
}

/// Current interaction mode. Everything except `Navigate` is modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// `folder` is None while the folder is being typed, then holds it
    /// while the file name is typed
    Create { folder: Option<String> },
    Rename,
    SetFolder,
    Tag,
    ConfirmDelete,
    ConfirmCopy,
}

impl Mode {
    /// Label shown in front of the text input
    pub fn prompt_label(&self) -> Option<&'static str> {
        match self {
            Mode::Search => Some("/"),
            Mode::Create { folder: None } => Some("Folder: "),
            Mode::Create { folder: Some(_) } => Some("Name: "),
            Mode::Rename => Some("Rename: "),
            Mode::SetFolder => Some("Move to folder: "),
            Mode::Tag => Some("Tags: "),
            _ => None,
        }
    }
}

/// Single-line text input with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub buffer: String,
    pub cursor: usize,
}

impl TextInput {
    /// Input holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        TextInput {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        match prev_grapheme_boundary(&self.buffer, self.cursor) {
            Some(prev) => {
                self.buffer.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self) -> bool {
        match next_grapheme_boundary(&self.buffer, self.cursor) {
            Some(next) => {
                self.buffer.replace_range(self.cursor..next, "");
                true
            }
            None => false,
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

/// A committed or in-progress search over the current folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub query: String,
    /// Indices into the folder's snippet list, best match first
    pub matches: Vec<usize>,
}

/// What Search mode restores on cancel
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub filter: Option<Filter>,
    pub cursor: usize,
}

/// One-line message in the status row, cleared by the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("could not start {editor}: {source}")]
    Spawn { editor: String, source: io::Error },
    #[error("{editor} exited with {status}")]
    Failed { editor: String, status: ExitStatus },
}

/// Main application state
pub struct App {
    pub config: Config,
    pub theme: Theme,
    /// Grouped view: folder name to its snippets, folders kept sorted
    pub folders: IndexMap<String, Vec<Snippet>>,
    pub folder_cursor: usize,
    /// Cursor into each folder's visible list
    pub snippet_cursors: HashMap<String, usize>,
    pub pane: Pane,
    pub mode: Mode,
    pub input: TextInput,
    pub filter: Option<Filter>,
    pub search_snapshot: Option<SearchSnapshot>,
    pub content: ContentCache,
    pub content_scroll: usize,
    pub status: Option<StatusMessage>,
    pub show_full_help: bool,
    pub copied_at: Option<Instant>,
    /// Text waiting to be sent to the clipboard by the event loop
    pub pending_clipboard: Option<String>,
    /// Where `p` reads pasted text from
    pub clipboard_source: Box<dyn ClipboardSource>,
    /// File waiting to be opened in the external editor
    pub pending_edit: Option<PathBuf>,
    pub should_quit: bool,
}

/// Partition the index by folder. Each folder keeps the index's relative
/// order; folders are sorted by name.
pub fn group_by_folder(snippets: Vec<Snippet>) -> IndexMap<String, Vec<Snippet>> {
    let mut folders: IndexMap<String, Vec<Snippet>> = IndexMap::new();
    for snippet in snippets {
        folders
            .entry(snippet.folder.clone())
            .or_default()
            .push(snippet);
    }
    sort_folders(&mut folders);
    folders
}

/// Order folders by their list row's sort key
fn sort_folders(folders: &mut IndexMap<String, Vec<Snippet>>) {
    folders.sort_by(|a, a_list, b, b_list| {
        let a = ListItem::Folder { name: a, count: a_list.len() };
        let b = ListItem::Folder { name: b, count: b_list.len() };
        a.sort_key().cmp(&b.sort_key())
    });
}

impl App {
    pub fn new(config: Config, snippets: Vec<Snippet>) -> Self {
        let theme = Theme::from_config(&config.colors);
        App {
            config,
            theme,
            folders: group_by_folder(snippets),
            folder_cursor: 0,
            snippet_cursors: HashMap::new(),
            pane: Pane::Folders,
            mode: Mode::Navigate,
            input: TextInput::default(),
            filter: None,
            search_snapshot: None,
            content: ContentCache::default(),
            content_scroll: 0,
            status: None,
            show_full_help: false,
            copied_at: None,
            pending_clipboard: None,
            clipboard_source: Box::new(SystemClipboard),
            pending_edit: None,
            should_quit: false,
        }
    }

    pub fn home(&self) -> &Path {
        &self.config.home
    }

    /// Flatten the grouped view back into one index, folders in name order
    pub fn flatten(&self) -> Vec<Snippet> {
        self.folders.values().flatten().cloned().collect()
    }

    pub fn current_folder(&self) -> Option<&str> {
        self.folders
            .get_index(self.folder_cursor)
            .map(|(name, _)| name.as_str())
    }

    /// Every snippet of the current folder, unfiltered
    pub fn folder_snippets(&self) -> &[Snippet] {
        self.folders
            .get_index(self.folder_cursor)
            .map_or(&[], |(_, list)| list.as_slice())
    }

    /// Indices (into `folder_snippets`) of the rows the snippets pane shows
    pub fn visible(&self) -> Vec<usize> {
        match &self.filter {
            Some(filter) => filter.matches.clone(),
            None => (0..self.folder_snippets().len()).collect(),
        }
    }

    pub fn snippet_cursor(&self) -> usize {
        self.current_folder()
            .and_then(|f| self.snippet_cursors.get(f))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_snippet_cursor(&mut self, cursor: usize) {
        if let Some(folder) = self.current_folder().map(str::to_string) {
            self.snippet_cursors.insert(folder, cursor);
        }
        self.content_scroll = 0;
    }

    /// Index into `folder_snippets` of the selected row
    pub fn selected_index(&self) -> Option<usize> {
        self.visible().get(self.snippet_cursor()).copied()
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        self.selected_index()
            .and_then(|i| self.folder_snippets().get(i))
    }

    pub fn selected_snippet_mut(&mut self) -> Option<&mut Snippet> {
        let index = self.selected_index()?;
        self.folders
            .get_index_mut(self.folder_cursor)
            .and_then(|(_, list)| list.get_mut(index))
    }

    /// Move the folder cursor. Leaving a folder drops its filter.
    pub fn select_folder(&mut self, index: usize) {
        let index = index.min(self.folders.len().saturating_sub(1));
        if index != self.folder_cursor {
            self.folder_cursor = index;
            self.filter = None;
            self.content_scroll = 0;
        }
    }

    /// Select `file` inside `folder`, if both exist
    pub fn select_snippet(&mut self, folder: &str, file: &str) {
        let Some(folder_index) = self.folders.get_index_of(folder) else {
            return;
        };
        self.select_folder(folder_index);
        if let Some(row) = self
            .visible()
            .iter()
            .position(|&i| self.folder_snippets()[i].file == file)
        {
            self.set_snippet_cursor(row);
        }
    }

    pub fn contains_path(&self, folder: &str, file: &str) -> bool {
        self.folders
            .get(folder)
            .is_some_and(|list| list.iter().any(|s| s.file == file))
    }

    /// Put `snippet` at the front of its folder (creating the folder) and
    /// select it.
    pub fn insert_front(&mut self, snippet: Snippet) {
        let folder = snippet.folder.clone();
        self.folders.entry(folder.clone()).or_default().insert(0, snippet);
        sort_folders(&mut self.folders);
        self.filter = None;
        if let Some(index) = self.folders.get_index_of(&folder) {
            self.folder_cursor = index;
        }
        self.set_snippet_cursor(0);
        self.content.invalidate();
    }

    /// Remove the snippet at `index` of the current folder. A folder left
    /// empty disappears from the grouped view.
    pub fn remove_from_current(&mut self, index: usize) -> Option<Snippet> {
        let (removed, emptied) = {
            let (name, list) = self.folders.get_index_mut(self.folder_cursor)?;
            if index >= list.len() {
                return None;
            }
            let removed = list.remove(index);
            (removed, list.is_empty().then(|| name.clone()))
        };

        if let Some(name) = emptied {
            self.folders.shift_remove(&name);
            self.snippet_cursors.remove(&name);
            self.filter = None;
            self.folder_cursor = self
                .folder_cursor
                .min(self.folders.len().saturating_sub(1));
        } else {
            self.refresh_filter();
        }
        self.content.invalidate();
        Some(removed)
    }

    /// Replace the snippet at `index` of the current folder
    pub fn replace_in_current(&mut self, index: usize, snippet: Snippet) {
        if let Some((_, list)) = self.folders.get_index_mut(self.folder_cursor)
            && let Some(slot) = list.get_mut(index)
        {
            *slot = snippet;
        }
        self.refresh_filter();
        self.content.invalidate();
    }

    /// Re-rank the active filter after the folder's contents changed
    pub fn refresh_filter(&mut self) {
        if let Some(query) = self.filter.as_ref().map(|f| f.query.clone()) {
            self.apply_filter(&query);
        }
        self.clamp_snippet_cursor();
    }

    /// Filter the current folder by `query`. An empty query clears it.
    pub fn apply_filter(&mut self, query: &str) {
        self.filter = if query.trim().is_empty() {
            None
        } else {
            let matches = fuzzy::rank_snippets(query, self.folder_snippets())
                .into_iter()
                .map(|m| m.index)
                .collect();
            Some(Filter {
                query: query.to_string(),
                matches,
            })
        };
    }

    pub fn clamp_snippet_cursor(&mut self) {
        let len = self.visible().len();
        let cursor = self.snippet_cursor();
        if cursor >= len {
            self.set_snippet_cursor(len.saturating_sub(1));
        }
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Time-driven transitions: the copy acknowledgment reverts on its own.
    pub fn tick(&mut self, now: Instant) {
        if self.mode == Mode::ConfirmCopy
            && self
                .copied_at
                .is_none_or(|at| now.saturating_duration_since(at) >= COPY_ACK)
        {
            self.mode = Mode::Navigate;
            self.copied_at = None;
        }
    }

    /// Reload the content pane after the external editor returns
    pub fn finish_edit(&mut self, outcome: Result<(), EditorError>) {
        self.content.invalidate();
        if let Err(e) = outcome {
            self.set_error(e.to_string());
        }
    }

    /// Restore the folder and snippet selected when the last session ended.
    /// Names that no longer exist are ignored.
    pub fn restore_session(&mut self, state: &SessionState) {
        if self.folders.contains_key(&state.current_folder) {
            self.select_snippet(&state.current_folder, &state.current_snippet);
        }
    }

    pub fn session_state(&self) -> SessionState {
        SessionState {
            current_folder: self.current_folder().unwrap_or_default().to_string(),
            current_snippet: self
                .selected_snippet()
                .map(|s| s.file.clone())
                .unwrap_or_default(),
        }
    }
}

/// `$VISUAL`, else `$EDITOR`, else `vi`
fn editor_command() -> String {
    std::env::var("VISUAL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_string())
}

/// Run the editor on `path` and wait for it. The command may carry
/// arguments (`code -w`).
fn launch_editor(path: &Path) -> Result<(), EditorError> {
    let editor = editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| EditorError::Spawn {
            editor: editor.clone(),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(EditorError::Failed { editor, status })
    }
}

/// Run the interactive session over `snippets`. The index is written back
/// once, when the session ends.
pub fn run(config: Config, snippets: Vec<Snippet>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config, snippets);
    if let Some(state) = read_session_state(app.home()) {
        app.restore_session(&state);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?;
            Ok(terminal)
        },
        restore_terminal,
    )?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    let saved = save_library(&app.config, &app.flatten());
    let _ = write_session_state(app.home(), &app.session_state());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = saved {
        println!("{}", e);
    }
    result
}

/// Leave raw mode and the alternate screen, ignoring failures
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`; on failure call `restore` before passing the error on
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(text) = app.pending_clipboard.take()
            && let Err(e) = clipboard::copy_to(&mut io::stdout(), &text)
        {
            app.set_error(format!("could not copy: {}", e));
        }

        if let Some(path) = app.pending_edit.take() {
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            let outcome = launch_editor(&path);
            enable_raw_mode()?;
            execute!(terminal.backend_mut(), EnterAlternateScreen)?;
            terminal.clear()?;
            app.finish_edit(outcome);
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
