use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::util::unicode::{expand_tabs, truncate_to_width};

use super::title_line;

/// Render the selected snippet's body with line numbers
pub fn render_content_pane(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.pane == Pane::Content;
    let width = area.width as usize;

    let Some(snippet) = app.selected_snippet().cloned() else {
        let hint = if app.folders.is_empty() {
            "press a to create a snippet"
        } else {
            "No snippet selected"
        };
        let lines = vec![
            title_line(&app.theme, "", app.theme.title(focused), area.width),
            Line::from(""),
            Line::from(Span::styled(format!(" {}", hint), app.theme.dim())),
        ];
        frame.render_widget(Paragraph::new(lines).style(app.theme.base()), area);
        return;
    };

    let mut title = snippet.name.clone();
    if !snippet.language.is_empty() {
        title.push_str(&format!("  {}", snippet.language));
    }
    for tag in &snippet.tags {
        title.push_str(&format!("  #{}", tag));
    }

    let home = app.config.home.clone();
    let body = app.content.get(&home, &snippet).to_string();
    let total = body.lines().count();
    let height = (area.height as usize).saturating_sub(2);
    app.content_scroll = app.content_scroll.min(total.saturating_sub(height));

    let theme = &app.theme;
    let mut lines: Vec<Line> = vec![
        title_line(theme, &title, theme.title(focused), area.width),
        Line::from(""),
    ];

    let number_width = total.to_string().len().max(2);
    let text_width = width.saturating_sub(number_width + 2);
    let number_style = theme.dim().add_modifier(Modifier::DIM);
    for (i, line) in body
        .lines()
        .enumerate()
        .skip(app.content_scroll)
        .take(height)
    {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>w$}  ", i + 1, w = number_width), number_style),
            Span::styled(
                truncate_to_width(&expand_tabs(line), text_width),
                theme.base(),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(theme.base()), area);
}
