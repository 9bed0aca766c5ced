use chrono::{DateTime, FixedOffset, Utc};

use crate::model::snippet::Snippet;

/// A row of the folders or snippets pane
#[derive(Debug, Clone, Copy)]
pub enum ListItem<'a> {
    Folder { name: &'a str, count: usize },
    Snippet(&'a Snippet),
}

impl ListItem<'_> {
    pub fn title(&self) -> String {
        match self {
            ListItem::Folder { name, .. } => name.to_string(),
            ListItem::Snippet(s) => s.name.clone(),
        }
    }

    /// Second line under the title: snippet count, or age plus tags
    pub fn subtitle(&self, now: DateTime<Utc>) -> String {
        match self {
            ListItem::Folder { count: 1, .. } => "1 snippet".to_string(),
            ListItem::Folder { count, .. } => format!("{} snippets", count),
            ListItem::Snippet(s) => {
                let mut out = relative_time(&s.date, now);
                for tag in &s.tags {
                    out.push_str("  #");
                    out.push_str(tag);
                }
                out
            }
        }
    }

    pub fn sort_key(&self) -> String {
        match self {
            ListItem::Folder { name, .. } => name.to_string(),
            ListItem::Snippet(s) => s.path().to_string_lossy().into_owned(),
        }
    }
}

/// Format a relative time string like "2 min ago", "yesterday", "3 days ago"
pub fn relative_time(dt: &DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt.with_timezone(&Utc));

    if duration.num_seconds() < 60 {
        return "just now".to_string();
    }
    let mins = duration.num_minutes();
    if mins < 60 {
        return format!("{} min ago", mins);
    }
    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{} hr ago", hours);
    }
    let days = duration.num_days();
    match days {
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=34 => format!("{} weeks ago", days / 7),
        35..=364 => format!("{} months ago", days / 30),
        _ => dt.format("%b %-d, %Y").to_string(),
    }
}
