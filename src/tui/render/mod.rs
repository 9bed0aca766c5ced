pub mod content_pane;
pub mod folders_pane;
pub mod list_item;
pub mod snippets_pane;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

use crate::util::unicode::pad_to_width;

use super::app::App;
use super::theme::Theme;

/// Width of the folders column in cells
pub const FOLDERS_WIDTH: u16 = 22;
/// Width of the snippets column in cells
pub const SNIPPETS_WIDTH: u16 = 35;

/// Draw the three panes and the status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    frame.render_widget(Block::default().style(app.theme.base()), area);

    // Layout: panes | status row (1 row)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(FOLDERS_WIDTH),
            Constraint::Length(SNIPPETS_WIDTH),
            Constraint::Min(1),
        ])
        .split(rows[0]);

    folders_pane::render_folders_pane(frame, app, columns[0]);
    snippets_pane::render_snippets_pane(frame, app, columns[1]);
    content_pane::render_content_pane(frame, app, columns[2]);
    status_row::render_status_row(frame, app, rows[1]);
}

/// Pane header: a padded title bar, highlighted when the pane has focus
pub(super) fn title_line<'a>(theme: &Theme, title: &str, style: Style, width: u16) -> Line<'a> {
    let text = pad_to_width(&format!(" {}", title), width.saturating_sub(1) as usize);
    Line::from(vec![
        Span::styled(text, style),
        Span::styled(" ", theme.base()),
    ])
}

/// First item to draw so that `cursor` is on screen, given `rows_per_item`
/// rows per item and `height` rows available
pub(super) fn scroll_offset(cursor: usize, rows_per_item: usize, height: usize) -> usize {
    let fits = (height / rows_per_item.max(1)).max(1);
    (cursor + 1).saturating_sub(fits)
}
