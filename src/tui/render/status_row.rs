use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::keys::{FULL_HELP, SHORT_HELP};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let line = if let Some(label) = app.mode.prompt_label() {
        // Prompt: label text▌rest
        let (before, after) = app.input.buffer.split_at(app.input.cursor);
        let spans = vec![
            Span::styled(label, Style::default().fg(theme.primary).bg(bg)),
            Span::styled(before.to_string(), Style::default().fg(theme.text).bg(bg)),
            Span::styled("\u{258C}", Style::default().fg(theme.primary).bg(bg)), // ▌ cursor
            Span::styled(after.to_string(), Style::default().fg(theme.text).bg(bg)),
        ];
        with_hint(spans, "enter confirm  esc cancel", app, width)
    } else {
        match app.mode {
            Mode::ConfirmDelete => {
                let path = app
                    .selected_snippet()
                    .map(|s| s.path().display().to_string())
                    .unwrap_or_default();
                let spans = vec![Span::styled(
                    format!("Delete {}? (y/n)", path),
                    Style::default()
                        .fg(theme.red)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                )];
                with_hint(spans, "y delete  n cancel", app, width)
            }
            Mode::ConfirmCopy => {
                let name = app
                    .selected_snippet()
                    .map(|s| s.name.as_str())
                    .unwrap_or_default();
                Line::from(Span::styled(
                    format!("Copied {}!", name),
                    Style::default().fg(theme.green).bg(bg),
                ))
            }
            _ => navigate_line(app, width),
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn navigate_line(app: &App, width: usize) -> Line<'static> {
    let theme = &app.theme;
    if let Some(status) = &app.status {
        let style = if status.is_error {
            theme.error()
        } else {
            theme.dim()
        };
        return Line::from(Span::styled(status.text.clone(), style));
    }
    if let Some(filter) = &app.filter {
        let spans = vec![Span::styled(format!("/{}", filter.query), theme.dim())];
        return with_hint(spans, "esc clear", app, width);
    }

    let help = if app.show_full_help {
        FULL_HELP
    } else {
        SHORT_HELP
    };
    let mut spans = Vec::new();
    for (i, (keys, desc)) in help.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.dim()));
        }
        spans.push(Span::styled(
            keys.to_string(),
            Style::default().fg(theme.subtext).bg(theme.background).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), theme.dim()));
    }
    Line::from(spans)
}

/// Append `hint` right-aligned when it fits after `spans`
fn with_hint(mut spans: Vec<Span<'static>>, hint: &'static str, app: &App, width: usize) -> Line<'static> {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(app.theme.background),
        ));
        spans.push(Span::styled(hint, app.theme.dim()));
    }
    Line::from(spans)
}
