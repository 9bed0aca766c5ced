use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, Pane};
use crate::util::unicode::pad_to_width;

use super::list_item::ListItem;
use super::{scroll_offset, title_line};

/// Rows per snippet: title, subtitle, gap
const ITEM_ROWS: usize = 3;

/// Render the current folder's snippets (or the active search results)
pub fn render_snippets_pane(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.pane == Pane::Snippets;
    let width = area.width.saturating_sub(1) as usize;

    let selected_name = app.selected_snippet().map(|s| s.name.clone());
    let (title, title_style) = match (&app.mode, selected_name) {
        (Mode::ConfirmDelete, Some(name)) => (
            format!("Delete {}? (y/N)", name),
            Style::default()
                .fg(theme.text_invert)
                .bg(theme.red)
                .add_modifier(Modifier::BOLD),
        ),
        (Mode::ConfirmCopy, Some(name)) => (
            format!("Copied {}!", name),
            Style::default()
                .fg(theme.text_invert)
                .bg(theme.green)
                .add_modifier(Modifier::BOLD),
        ),
        _ => match &app.filter {
            Some(filter) => (format!("Snippets /{}", filter.query), theme.title(focused)),
            None => ("Snippets".to_string(), theme.title(focused)),
        },
    };

    let mut lines: Vec<Line> = vec![title_line(theme, &title, title_style, area.width), Line::from("")];

    let visible = app.visible();
    let snippets = app.folder_snippets();
    if visible.is_empty() {
        let hint = if app.filter.is_some() {
            "  No matches"
        } else {
            "  No snippets"
        };
        lines.push(Line::from(Span::styled(pad_to_width(hint, width), theme.dim())));
    }

    let cursor = app.snippet_cursor();
    let height = (area.height as usize).saturating_sub(2);
    let offset = scroll_offset(cursor, ITEM_ROWS, height);
    let now = Utc::now();

    for (row, &index) in visible.iter().enumerate().skip(offset) {
        let Some(snippet) = snippets.get(index) else {
            continue;
        };
        let item = ListItem::Snippet(snippet);
        let selected = row == cursor;

        let (title_style, subtitle_style) = if !selected {
            (theme.base(), theme.dim())
        } else {
            let accent = match app.mode {
                Mode::ConfirmDelete => Style::default().fg(theme.red).bg(theme.background),
                Mode::ConfirmCopy => Style::default().fg(theme.green).bg(theme.background),
                _ => theme.selected(focused),
            };
            (accent, accent.remove_modifier(Modifier::BOLD))
        };
        let marker = if selected { "│ " } else { "  " };

        lines.push(Line::from(Span::styled(
            pad_to_width(&format!("{}{}", marker, item.title()), width),
            title_style,
        )));
        lines.push(Line::from(Span::styled(
            pad_to_width(&format!("{}{}", marker, item.subtitle(now)), width),
            subtitle_style,
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).style(theme.base()), area);
}
