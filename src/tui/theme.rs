use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub primary_subdued: Color,
    pub green: Color,
    pub bright_green: Color,
    pub red: Color,
    pub bright_red: Color,
    pub gray: Color,
    pub text: Color,
    pub subtext: Color,
    pub text_invert: Color,
    pub background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: Color::Rgb(0x74, 0xC7, 0xEC),
            primary_subdued: Color::Rgb(0x94, 0xE2, 0xD5),
            green: Color::Rgb(0xA6, 0xE3, 0xA1),
            bright_green: Color::Rgb(0xF9, 0xE2, 0xAF),
            red: Color::Rgb(0xF3, 0x8B, 0xA8),
            bright_red: Color::Rgb(0xEB, 0xA0, 0xAC),
            gray: Color::Rgb(0x31, 0x32, 0x44),
            text: Color::Rgb(0xCD, 0xD6, 0xF4),
            subtext: Color::Rgb(0x6C, 0x70, 0x86),
            text_invert: Color::Rgb(0x11, 0x11, 0x1B),
            background: Color::Reset,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Apply `[colors]` overrides from the config. Unknown keys and
    /// unparseable values are ignored.
    pub fn from_config(colors: &HashMap<String, String>) -> Self {
        let mut theme = Theme::default();
        for (key, value) in colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            let slot = match key.as_str() {
                "primary" => &mut theme.primary,
                "primary_subdued" => &mut theme.primary_subdued,
                "green" => &mut theme.green,
                "bright_green" => &mut theme.bright_green,
                "red" => &mut theme.red,
                "bright_red" => &mut theme.bright_red,
                "gray" => &mut theme.gray,
                "text" => &mut theme.text,
                "subtext" => &mut theme.subtext,
                "text_invert" => &mut theme.text_invert,
                "background" => &mut theme.background,
                _ => continue,
            };
            *slot = color;
        }
        theme
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.subtext).bg(self.background)
    }

    /// Pane title: bright when the pane has focus
    pub fn title(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.text_invert)
                .bg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text).bg(self.gray)
        }
    }

    /// Selected row: accent color when its pane has focus
    pub fn selected(&self, focused: bool) -> Style {
        let fg = if focused {
            self.primary
        } else {
            self.primary_subdued
        };
        Style::default()
            .fg(fg)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.red).bg(self.background)
    }
}
