use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::util::unicode::pad_to_width;

use super::list_item::ListItem;
use super::{scroll_offset, title_line};

/// Render the folder list, one row per folder
pub fn render_folders_pane(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane == Pane::Folders;
    let width = area.width.saturating_sub(1) as usize;
    let mut lines: Vec<Line> = vec![
        title_line(&app.theme, "Folders", app.theme.title(focused), area.width),
        Line::from(""),
    ];

    if app.folders.is_empty() {
        lines.push(Line::from(Span::styled(
            pad_to_width("  No folders", width),
            app.theme.dim(),
        )));
    }

    let height = (area.height as usize).saturating_sub(2);
    let offset = scroll_offset(app.folder_cursor, 1, height);
    for (i, (name, list)) in app.folders.iter().enumerate().skip(offset).take(height) {
        let item = ListItem::Folder {
            name: name.as_str(),
            count: list.len(),
        };
        let selected = i == app.folder_cursor;
        let (marker, style) = if selected {
            ("→ ", app.theme.selected(focused))
        } else {
            ("  ", app.theme.base())
        };
        lines.push(Line::from(Span::styled(
            pad_to_width(&format!("{}{}", marker, item.title()), width),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(app.theme.base()), area);
}
