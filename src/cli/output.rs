use crossterm::style::Stylize;
use regex::Regex;

/// Languages whose line comments start with `#`
const HASH_COMMENT: &[&str] = &["py", "sh", "bash", "zsh", "fish", "rb", "pl", "toml", "yaml", "yml", "r", "nix"];
/// Languages whose line comments start with `--`
const DASH_COMMENT: &[&str] = &["sql", "lua", "hs", "elm"];

fn token_pattern(language: &str) -> Result<Regex, regex::Error> {
    let comment = if HASH_COMMENT.contains(&language) {
        "#.*$"
    } else if DASH_COMMENT.contains(&language) {
        "--.*$"
    } else {
        "//.*$"
    };
    Regex::new(&format!(
        r#"(?P<comment>{})|(?P<string>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`[^`]*`)|(?P<number>\b\d+(?:\.\d+)?\b)"#,
        comment
    ))
}

/// Number and tint `content` for a terminal. Falls back to the plain text
/// when the token pattern cannot be built.
pub fn highlight(content: &str, language: &str) -> String {
    let Ok(re) = token_pattern(language) else {
        return content.to_string();
    };

    let total = content.lines().count();
    let width = total.to_string().len().max(2);
    let mut out = String::with_capacity(content.len() * 2);
    for (i, line) in content.lines().enumerate() {
        out.push_str(&format!("{:>w$}  ", i + 1, w = width).dark_grey().to_string());
        out.push_str(&highlight_line(&re, line));
        out.push('\n');
    }
    out
}

fn highlight_line(re: &Regex, line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in re.captures_iter(line) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&line[last..m.start()]);
        let text = m.as_str();
        let styled = if caps.name("comment").is_some() {
            text.dark_grey().italic().to_string()
        } else if caps.name("string").is_some() {
            text.green().to_string()
        } else {
            text.yellow().to_string()
        };
        out.push_str(&styled);
        last = m.end();
    }
    out.push_str(&line[last..]);
    out
}
